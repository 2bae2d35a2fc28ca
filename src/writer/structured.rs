use super::grids::check_values;
use crate::mesh::Patch;
use crate::options::WriteOptions;
use crate::properties;
use crate::report::{NanAccumulator, WriteReport};
use crate::traits::{Aggregate, GridSource};
use crate::types::Coordinate;
use crate::utils;
use crate::write_vtk;
use crate::Error;

use std::io::Write;
use std::path::Path;

/// Writes structured patches as a `StructuredGrid`, one `Piece` per patch.
///
/// The extent of a piece is the patch's domain moved by its integer offset, so patches of
/// one level line up in the global index space. `WholeExtent` is the bounding box of all
/// pieces. Only the domain points are written, there is no enlargement.
#[derive(Debug)]
pub struct StructuredGridWriter<'a, G, T, const D: usize> {
    patches: Vec<Patch<'a, G, T, D>>,
}

impl<'a, G, T, const D: usize> Default for StructuredGridWriter<'a, G, T, D> {
    fn default() -> Self {
        Self {
            patches: Vec::new(),
        }
    }
}

impl<'a, G, T, const D: usize> StructuredGridWriter<'a, G, T, D>
where
    G: GridSource<D>,
    G::Element: Aggregate,
    T: Coordinate,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, patch: Patch<'a, G, T, D>) {
        self.patches.push(patch);
    }

    pub fn write<P: AsRef<Path>>(
        &self,
        path: P,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        let file = utils::create(path.as_ref())?;
        self.write_to(file, options)
    }

    pub fn write_to<W: Write>(&self, sink: W, options: &WriteOptions) -> Result<WriteReport, Error> {
        super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        let mut nan = NanAccumulator::default();

        let extents: Vec<([i64; D], [i64; D])> = self
            .patches
            .iter()
            .map(|patch| {
                (
                    patch.global_index(patch.domain.low),
                    patch.global_index(patch.domain.high),
                )
            })
            .collect();

        let mut whole = ([0i64; D], [0i64; D]);
        if let Some((low, high)) = extents.first() {
            whole = (*low, *high);
        }
        for (low, high) in &extents {
            for d in 0..D {
                whole.0[d] = whole.0[d].min(low[d]);
                whole.1[d] = whole.1[d].max(high[d]);
            }
        }

        let keys: Vec<Vec<[i64; D]>> = self
            .patches
            .iter()
            .map(|patch| patch.domain.iter().collect())
            .collect();
        for (patch, keys) in self.patches.iter().zip(&keys) {
            check_values(patch, keys, &mut report);
        }

        let layouts = properties::xml_layout::<G::Element>(options, &mut report);
        let field_data = options.field_data(&mut report);

        let mut writer = write_vtk::xml_writer(sink);
        let whole_extent = utils::extent_string(whole.0, whole.1);
        write_vtk::start_document(
            &mut writer,
            "StructuredGrid",
            &[("WholeExtent", whole_extent.as_str())],
        )?;
        write_vtk::write_field_data(&mut writer, &field_data, options.encoding)?;

        for ((patch, keys), (low, high)) in self.patches.iter().zip(&keys).zip(&extents) {
            let extent = utils::extent_string(*low, *high);
            write_vtk::start_element(&mut writer, "Piece", &[("Extent", extent.as_str())])?;

            let points: Vec<[T; D]> = keys.iter().map(|key| patch.position(*key)).collect();
            write_vtk::write_points(&mut writer, &points, options.encoding)?;

            let elements = keys.iter().map(|key| patch.value(*key));
            properties::write_section(
                &mut writer,
                "PointData",
                &layouts,
                elements,
                options.encoding,
                &mut nan,
            )?;

            write_vtk::end_element(&mut writer, "Piece")?;
        }

        write_vtk::end_document(&mut writer, "StructuredGrid")?;
        write_vtk::finish(writer)?;

        nan.finish(&mut report);
        report.points = keys.iter().map(Vec::len).sum();
        report.cells = self
            .patches
            .iter()
            .map(|patch| {
                patch
                    .domain
                    .lengths()
                    .iter()
                    .map(|l| l.saturating_sub(1))
                    .product::<usize>()
            })
            .sum();

        Ok(report)
    }
}
