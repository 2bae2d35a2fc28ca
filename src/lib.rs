//! # vtk-writer
//!
//! Writers for VTK visualization files from in-memory simulation data: point clouds,
//! structured grid patches, adaptive mesh refinement patches merged into one unstructured
//! mesh, axis aligned boxes and graphs.
//!
//! Elements describe their properties through the [`Aggregate`] trait (derivable with the
//! `derive` feature). Every writer accumulates references with `add` and produces the whole
//! document with `write`, returning a [`WriteReport`] with the recoverable problems found
//! along the way. Only failing to create or write the output is an [`Error`].
//!
//! ```no_run
//! use ndarray::Array2;
//! use vtk_writer::{Encoding, GridLayout, GridWriter, Patch, WriteOptions};
//!
//! // a density and a velocity on every node
//! let grid = Array2::from_elem((17, 17), (1.0f64, [0.0f64, 0.0]));
//!
//! let mut writer = GridWriter::new(GridLayout::Pieces).enlarge_upper(false);
//! writer.add(Patch::whole(&grid, [0.0, 0.0], [0.1, 0.1]));
//!
//! let names = ["rho", "velocity"];
//! let options = WriteOptions::new()
//!     .names(&names)
//!     .meta("time=0.5")
//!     .encoding(Encoding::Binary);
//! let report = writer.write("flow.vtu", &options).unwrap();
//! assert!(report.is_complete());
//! ```

extern crate self as vtk_writer;

pub mod array;
mod data;
pub mod encode;
mod legacy;
pub mod mesh;
mod options;
pub mod prelude;
mod properties;
mod report;
mod traits;
pub mod types;
mod utils;
pub mod writer;
mod write_vtk;

pub use traits::{Aggregate, GraphSource, GridSource};
pub use types::{Coordinate, Numeric, PropertyKind, Scalar, ScalarType, VtkValue};

pub use data::PointSet;
pub use mesh::{AxisBox, CellType, DomainBox, EdgeListGraph, Patch, VertexMap};
pub use options::WriteOptions;
pub use properties::PropertySelection;
pub use report::{Warning, WriteReport, WriteStatus};
pub use write_vtk::Encoding;
pub use writer::{
    AmrWriter, BoxWriter, GraphWriter, GridLayout, GridWriter, PointSetWriter,
    StructuredGridWriter,
};

#[cfg(feature = "derive")]
pub use vtk_writer_derive::Aggregate;

pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not open `{}` for writing: `{source}`", .path.display())]
    Create {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("Cells can only be built in 1, 2 or 3 dimensions, not {0}")]
    Dimension(usize),
}
