use super::grids::{check_values, write_piece};
use crate::mesh::amr::{self, LevelLayout};
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

/// Writes the patches of an adaptive mesh as a single unstructured `Piece`.
///
/// Levels are declared first with [`add_level`](Self::add_level), giving the number of
/// cells of the whole level along each dimension. Patches are then added to a level with
/// their integer offset on that level. A vertex shared by several patches of a level is
/// written once; its properties come from the first patch that registered it.
///
/// A cell is written only when all of its corners belong to some patch's domain, so the
/// cells along the outer upper boundary of the last patch in each direction are left out.
///
/// ```no_run
/// use ndarray::Array2;
/// use vtk_writer::{AmrWriter, Patch, WriteOptions};
///
/// let coarse = Array2::<f64>::zeros((5, 5));
/// let fine = Array2::<f64>::ones((5, 5));
///
/// let mut writer = AmrWriter::new();
/// let level_0 = writer.add_level([8, 8]);
/// let level_1 = writer.add_level([16, 16]);
/// writer.add(level_0, Patch::whole(&coarse, [0.0, 0.0], [0.25, 0.25]));
/// writer.add(
///     level_1,
///     Patch::whole(&fine, [1.0, 1.0], [0.125, 0.125]).with_index_offset([8, 8]),
/// );
///
/// writer.write("amr.vtu", &WriteOptions::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct AmrWriter<'a, G, T, const D: usize> {
    levels: Vec<[usize; D]>,
    patches: Vec<(usize, Patch<'a, G, T, D>)>,
}

impl<'a, G, T, const D: usize> Default for AmrWriter<'a, G, T, D> {
    fn default() -> Self {
        Self {
            levels: Vec::new(),
            patches: Vec::new(),
        }
    }
}

impl<'a, G, T, const D: usize> AmrWriter<'a, G, T, D>
where
    G: GridSource<D>,
    G::Element: Aggregate,
    T: Coordinate,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// declare the next refinement level with `size` cells per dimension, returning its number
    pub fn add_level(&mut self, size: [usize; D]) -> usize {
        self.levels.push(size);
        self.levels.len() - 1
    }

    pub fn add(&mut self, level: usize, patch: Patch<'a, G, T, D>) {
        self.patches.push((level, patch));
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
        let cell_type = super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        let mut nan = NanAccumulator::default();

        let layout = LevelLayout::new(&self.levels);
        let geometry = amr::build(&layout, &self.patches, cell_type, &mut report);
        // patches on undeclared levels were skipped by the builder
        for (_, patch) in self.patches.iter().filter(|(level, _)| *level < self.levels.len()) {
            let keys: Vec<[i64; D]> = patch.domain.iter().collect();
            check_values(patch, &keys, &mut report);
        }

        let layouts = properties::xml_layout::<G::Element>(options, &mut report);
        let field_data = options.field_data(&mut report);

        let mut writer = write_vtk::xml_writer(sink);
        write_vtk::start_document(&mut writer, "UnstructuredGrid", &[])?;
        write_vtk::write_field_data(&mut writer, &field_data, options.encoding)?;

        let patches = &self.patches;
        let elements = geometry
            .sources
            .iter()
            .map(move |source| patches[source.patch].1.value(source.key));
        write_piece(
            &mut writer,
            &geometry.points,
            &geometry.cells,
            &layouts,
            elements,
            options.encoding,
            &mut nan,
        )?;

        write_vtk::end_document(&mut writer, "UnstructuredGrid")?;
        write_vtk::finish(writer)?;

        nan.finish(&mut report);
        report.points = geometry.points.len();
        report.cells = geometry.cells.len();

        Ok(report)
    }
}
