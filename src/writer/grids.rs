use crate::mesh::grid::{self, PatchGeometry};
use crate::mesh::{Cells, Patch};
use crate::options::WriteOptions;
use crate::properties::{self, ArrayLayout};
use crate::report::{NanAccumulator, Warning, WriteReport};
use crate::traits::{Aggregate, GridSource};
use crate::types::Coordinate;
use crate::utils;
use crate::write_vtk::{self, Encoding};
use crate::Error;

use quick_xml::Writer;
use std::io::Write;
use std::path::Path;

/// how the patches of a [`GridWriter`] are laid out in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridLayout {
    /// one independent `Piece` per patch
    #[default]
    Pieces,
    /// all patches concatenated into a single `Piece`. Vertices shared between patches are
    /// written once per patch.
    Merged,
}

/// Writes structured patches as an `UnstructuredGrid`.
///
/// Each patch contributes the points of its domain box and one cell per grid cell, with
/// implicit connectivity. By default the domain is grown by one layer on its upper side so
/// that the cells touching the upper boundary are closed; the grid must hold that extra
/// layer, nodes missing from the grid are written as zero and reported.
///
/// ```no_run
/// use ndarray::Array1;
/// use vtk_writer::{DomainBox, GridLayout, GridWriter, Patch, WriteOptions};
///
/// let grid = Array1::from_shape_fn(16, |i| i as f64);
///
/// let mut writer = GridWriter::new(GridLayout::Pieces);
/// writer.add(Patch::new(&grid, [0.0], [0.1], DomainBox::new([1], [14])));
/// writer.add(Patch::new(&grid, [5.0], [0.2], DomainBox::new([2], [13])));
///
/// writer.write("grids.vtu", &WriteOptions::new()).unwrap();
/// ```
#[derive(Debug)]
pub struct GridWriter<'a, G, T, const D: usize> {
    patches: Vec<Patch<'a, G, T, D>>,
    layout: GridLayout,
    enlarge: bool,
}

impl<'a, G, T, const D: usize> GridWriter<'a, G, T, D>
where
    G: GridSource<D>,
    G::Element: Aggregate,
    T: Coordinate,
{
    pub fn new(layout: GridLayout) -> Self {
        Self {
            patches: Vec::new(),
            layout,
            enlarge: true,
        }
    }

    /// include the layer above the upper bound of each domain (the default)
    pub fn enlarge_upper(mut self, enlarge: bool) -> Self {
        self.enlarge = enlarge;
        self
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
        let cell_type = super::cell_type::<D>()?;

        let mut report = WriteReport::default();
        let mut nan = NanAccumulator::default();

        let geometries: Vec<PatchGeometry<T, D>> = self
            .patches
            .iter()
            .map(|patch| grid::build(patch, cell_type, self.enlarge))
            .collect();
        for (patch, geometry) in self.patches.iter().zip(&geometries) {
            check_values(patch, &geometry.keys, &mut report);
        }

        let layouts = properties::xml_layout::<G::Element>(options, &mut report);
        let field_data = options.field_data(&mut report);

        let mut writer = write_vtk::xml_writer(sink);
        write_vtk::start_document(&mut writer, "UnstructuredGrid", &[])?;
        write_vtk::write_field_data(&mut writer, &field_data, options.encoding)?;

        match self.layout {
            GridLayout::Pieces => {
                for (patch, geometry) in self.patches.iter().zip(&geometries) {
                    let elements = geometry.keys.iter().map(move |key| patch.value(*key));
                    write_piece(
                        &mut writer,
                        &geometry.points,
                        &geometry.cells,
                        &layouts,
                        elements,
                        options.encoding,
                        &mut nan,
                    )?;
                }
            }
            GridLayout::Merged => {
                let mut cells = Cells::new(cell_type);
                let mut shift = 0;
                for geometry in &geometries {
                    cells.append_shifted(&geometry.cells, shift);
                    shift += geometry.points.len();
                }

                let points: Vec<[T; D]> = geometries
                    .iter()
                    .flat_map(|g| g.points.iter().copied())
                    .collect();
                let elements = self
                    .patches
                    .iter()
                    .zip(&geometries)
                    .flat_map(|(patch, g)| g.keys.iter().map(move |key| patch.value(*key)));
                write_piece(
                    &mut writer,
                    &points,
                    &cells,
                    &layouts,
                    elements,
                    options.encoding,
                    &mut nan,
                )?;
            }
        }

        write_vtk::end_document(&mut writer, "UnstructuredGrid")?;
        write_vtk::finish(writer)?;

        nan.finish(&mut report);
        report.points = geometries.iter().map(|g| g.points.len()).sum();
        report.cells = geometries.iter().map(|g| g.cells.len()).sum();
        log::debug!(
            "wrote {} patches: {} points, {} cells",
            self.patches.len(),
            report.points,
            report.cells
        );

        Ok(report)
    }
}

/// report emitted points that have no node in the backing grid
pub(crate) fn check_values<G, T, const D: usize>(
    patch: &Patch<G, T, D>,
    keys: &[[i64; D]],
    report: &mut WriteReport,
) where
    G: GridSource<D>,
    T: Coordinate,
{
    let found = keys
        .iter()
        .filter(|key| patch.value(**key).is_some())
        .count();
    if found < keys.len() {
        report.warn(Warning::ShapeMismatch {
            context: "patch values",
            expected: keys.len(),
            found,
        });
    }
}

/// one `Piece` of an `UnstructuredGrid`
pub(crate) fn write_piece<'e, W, T, A, I, const D: usize>(
    writer: &mut Writer<W>,
    points: &[[T; D]],
    cells: &Cells,
    layouts: &[ArrayLayout],
    elements: I,
    encoding: Encoding,
    nan: &mut NanAccumulator,
) -> Result<(), Error>
where
    W: Write,
    T: Coordinate,
    A: Aggregate + 'e,
    I: Iterator<Item = Option<&'e A>> + Clone,
{
    let n_points = points.len().to_string();
    let n_cells = cells.len().to_string();
    write_vtk::start_element(
        writer,
        "Piece",
        &[
            ("NumberOfPoints", n_points.as_str()),
            ("NumberOfCells", n_cells.as_str()),
        ],
    )?;

    write_vtk::write_points(writer, points, encoding)?;
    write_vtk::write_cells(writer, cells, encoding)?;
    properties::write_section(writer, "PointData", layouts, elements, encoding, nan)?;

    write_vtk::end_element(writer, "Piece")
}
