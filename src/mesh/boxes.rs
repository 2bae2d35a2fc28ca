//! Axis aligned boxes written as one quad / hexahedron each.

use super::corner_offsets;
use crate::types::Coordinate;
use derive_more::Constructor;

#[derive(Debug, Clone, Copy, PartialEq, Constructor)]
pub struct AxisBox<T, const D: usize> {
    pub low: [T; D],
    pub high: [T; D],
}

impl<T: Coordinate, const D: usize> AxisBox<T, D> {
    /// the `2^D` corners in vtk winding order
    pub fn corners(&self) -> Vec<[T; D]> {
        corner_offsets::<D>()
            .into_iter()
            .map(|offset| {
                let mut corner = self.low;
                for d in 0..D {
                    if offset[d] == 1 {
                        corner[d] = self.high[d];
                    }
                }
                corner
            })
            .collect()
    }
}
