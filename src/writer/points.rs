use crate::data::PointSet;
use crate::mesh::Cells;
use crate::options::WriteOptions;
use crate::properties;
use crate::report::{NanAccumulator, WriteReport};
use crate::traits::Aggregate;
use crate::types::Coordinate;
use crate::utils;
use crate::write_vtk;
use crate::Error;

use std::io::Write;
use std::path::Path;

/// Writes point clouds as a single `PolyData` piece.
///
/// Every added set is appended to the same piece and every point gets a vertex cell so the
/// points render without a glyph filter. Vector properties are written as one
/// multi-component array.
///
/// ```no_run
/// use vtk_writer::{PointSetWriter, WriteOptions};
///
/// let positions = vec![[0.0f32, 0.0, 0.0], [1.0, 0.0, 0.0]];
/// let values = vec![(1.0f32, [0.0f32, 1.0, 0.0]), (2.0, [1.0, 0.0, 0.0])];
///
/// let mut writer = PointSetWriter::new();
/// writer.add(&positions, &values, positions.len());
///
/// let names = ["scalar", "vector"];
/// writer.write("points.vtp", &WriteOptions::new().names(&names)).unwrap();
/// ```
#[derive(Debug)]
pub struct PointSetWriter<'a, T, P, const D: usize> {
    sets: Vec<PointSet<'a, T, P, D>>,
}

impl<'a, T, P, const D: usize> Default for PointSetWriter<'a, T, P, D> {
    fn default() -> Self {
        Self { sets: Vec::new() }
    }
}

impl<'a, T, P, const D: usize> PointSetWriter<'a, T, P, D>
where
    T: Coordinate,
    P: Aggregate,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// add the first `n_real` points of a set
    pub fn add(&mut self, positions: &'a [[T; D]], properties: &'a [P], n_real: usize) {
        self.sets
            .push(PointSet::new(positions, properties).with_real(n_real));
    }

    pub fn add_set(&mut self, set: PointSet<'a, T, P, D>) {
        self.sets.push(set);
    }

    pub fn write<Pth: AsRef<Path>>(
        &self,
        path: Pth,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        let file = utils::create(path.as_ref())?;
        self.write_to(file, options)
    }

    pub fn write_to<W: Write>(&self, sink: W, options: &WriteOptions) -> Result<WriteReport, Error> {
        super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        let mut nan = NanAccumulator::default();

        let lens: Vec<usize> = self
            .sets
            .iter()
            .map(|set| set.resolve_len(&mut report))
            .collect();
        let n_points: usize = lens.iter().sum();

        let layouts = properties::xml_layout::<P>(options, &mut report);
        let field_data = options.field_data(&mut report);

        let mut writer = write_vtk::xml_writer(sink);
        write_vtk::start_document(&mut writer, "PolyData", &[])?;
        write_vtk::write_field_data(&mut writer, &field_data, options.encoding)?;

        let n = n_points.to_string();
        write_vtk::start_element(
            &mut writer,
            "Piece",
            &[
                ("NumberOfPoints", n.as_str()),
                ("NumberOfVerts", n.as_str()),
                ("NumberOfLines", "0"),
                ("NumberOfStrips", "0"),
                ("NumberOfPolys", "0"),
            ],
        )?;

        let positions = self
            .sets
            .iter()
            .zip(&lens)
            .flat_map(|(set, len)| set.positions[..*len].iter());
        write_vtk::write_points(&mut writer, positions, options.encoding)?;

        write_vtk::start_element(&mut writer, "Verts", &[])?;
        write_vtk::write_topology(&mut writer, &Cells::vertices(n_points), options.encoding)?;
        write_vtk::end_element(&mut writer, "Verts")?;

        let elements = self
            .sets
            .iter()
            .zip(&lens)
            .flat_map(|(set, len)| (0..*len).map(move |i| set.properties.get(i)));
        properties::write_section(
            &mut writer,
            "PointData",
            &layouts,
            elements,
            options.encoding,
            &mut nan,
        )?;

        write_vtk::end_element(&mut writer, "Piece")?;
        write_vtk::end_document(&mut writer, "PolyData")?;
        write_vtk::finish(writer)?;

        nan.finish(&mut report);
        report.points = n_points;
        report.cells = n_points;
        log::debug!(
            "wrote {} points with {} arrays",
            n_points,
            layouts.len()
        );

        Ok(report)
    }

    /// Write a `PPolyData` manifest referencing `pieces` files named `<stem>_<i>.vtp`, where
    /// `stem` is the file stem of `path`. Only the schema of the arrays is written.
    pub fn write_parallel_manifest<Pth: AsRef<Path>>(
        &self,
        path: Pth,
        pieces: usize,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        let path = path.as_ref();
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("points")
            .to_string();
        let file = utils::create(path)?;
        self.write_parallel_manifest_to(file, &stem, pieces, options)
    }

    pub fn write_parallel_manifest_to<W: Write>(
        &self,
        sink: W,
        stem: &str,
        pieces: usize,
        options: &WriteOptions,
    ) -> Result<WriteReport, Error> {
        super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        let layouts = properties::xml_layout::<P>(options, &mut report);

        let mut writer = write_vtk::xml_writer(sink);
        write_vtk::start_document(&mut writer, "PPolyData", &[("GhostLevel", "0")])?;

        write_vtk::start_element(&mut writer, "PPointData", &[])?;
        for layout in &layouts {
            let components = layout.components.to_string();
            write_vtk::empty_element(
                &mut writer,
                "PDataArray",
                &[
                    ("type", layout.scalar_type.type_tag()),
                    ("Name", layout.name.as_str()),
                    ("NumberOfComponents", components.as_str()),
                ],
            )?;
        }
        write_vtk::end_element(&mut writer, "PPointData")?;

        write_vtk::start_element(&mut writer, "PPoints", &[])?;
        write_vtk::empty_element(
            &mut writer,
            "PDataArray",
            &[("type", T::SCALAR.type_tag()), ("NumberOfComponents", "3")],
        )?;
        write_vtk::end_element(&mut writer, "PPoints")?;

        for piece in 0..pieces {
            let source = format!("{}_{}.vtp", stem, piece);
            write_vtk::empty_element(&mut writer, "Piece", &[("Source", source.as_str())])?;
        }

        write_vtk::end_document(&mut writer, "PPolyData")?;
        write_vtk::finish(writer)?;

        Ok(report)
    }
}
