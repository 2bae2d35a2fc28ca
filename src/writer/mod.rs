//! # Writers
//!
//! One writer per shape category. Every writer follows the same pattern: data is registered
//! with repeated calls to `add` (only references are kept), then `write` / `write_to`
//! assembles the whole document in one pass. `write` takes `&self` and rebuilds every
//! intermediate table from scratch, so writing twice produces identical output.
//!
//! | writer | output |
//! |---|---|
//! | [`PointSetWriter`] | xml `PolyData` (`.vtp`), plus a `PPolyData` manifest (`.pvtp`) |
//! | [`GridWriter`] | xml `UnstructuredGrid` (`.vtu`), one piece per patch or all merged |
//! | [`StructuredGridWriter`] | xml `StructuredGrid` (`.vts`) |
//! | [`AmrWriter`] | xml `UnstructuredGrid` (`.vtu`) with vertices shared between patches |
//! | [`BoxWriter`] | legacy ascii `UNSTRUCTURED_GRID` (`.vtk`) |
//! | [`GraphWriter`] | legacy ascii `POLYDATA` (`.vtk`) |

mod amr;
mod boxes;
mod graph;
mod grids;
mod points;
mod structured;

pub use amr::AmrWriter;
pub use boxes::BoxWriter;
pub use graph::GraphWriter;
pub use grids::{GridLayout, GridWriter};
pub use points::PointSetWriter;
pub use structured::StructuredGridWriter;

use crate::mesh::CellType;
use crate::report::{Warning, WriteReport};
use crate::write_vtk::Encoding;
use crate::Error;

/// cell type of a `D` dimensional writer
pub(crate) fn cell_type<const D: usize>() -> Result<CellType, Error> {
    CellType::from_dimension(D).ok_or(Error::Dimension(D))
}

/// legacy files are always ascii
pub(crate) fn legacy_encoding(encoding: Encoding, report: &mut WriteReport) {
    if encoding == Encoding::Binary {
        report.warn(Warning::AsciiFallback);
    }
}
