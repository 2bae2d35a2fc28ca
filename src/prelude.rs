//! Common traits and types that are useful for working with `vtk_writer`

pub use crate::mesh::{DomainBox, Patch};
pub use crate::traits::{Aggregate, GraphSource, GridSource};
pub use crate::types::{Coordinate, Numeric, VtkValue};
pub use crate::{Encoding, PropertySelection, WriteOptions, WriteReport};
pub use crate::{
    AmrWriter, BoxWriter, GraphWriter, GridLayout, GridWriter, PointSetWriter,
    StructuredGridWriter,
};
