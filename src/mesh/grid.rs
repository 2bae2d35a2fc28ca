//! Geometry of a single structured patch, without any deduplication between patches.

use super::{corner_offsets, CellType, Cells, DomainBox, Patch};
use crate::traits::GridSource;
use crate::types::Coordinate;

/// Points, node keys and cells of one patch
#[derive(Debug, Clone)]
pub struct PatchGeometry<T, const D: usize> {
    /// the indices that were emitted
    pub extent: DomainBox<D>,
    pub points: Vec<[T; D]>,
    /// local grid index of every point, in point order
    pub keys: Vec<[i64; D]>,
    pub cells: Cells,
}

/// The indices emitted for `patch`: its domain, optionally grown by one layer on the upper
/// side so that the cells touching the upper boundary are closed.
pub fn extent<G, T, const D: usize>(patch: &Patch<G, T, D>, enlarge: bool) -> DomainBox<D>
where
    G: GridSource<D>,
    T: Coordinate,
{
    if enlarge {
        patch.domain.enlarge_upper(1)
    } else {
        patch.domain
    }
}

/// build the points and implicit connectivity of `patch`.
///
/// A cell is emitted for every point of the extent whose full set of corners lies in the
/// extent. Corner indices are local to the patch.
pub fn build<G, T, const D: usize>(
    patch: &Patch<G, T, D>,
    cell_type: CellType,
    enlarge: bool,
) -> PatchGeometry<T, D>
where
    G: GridSource<D>,
    T: Coordinate,
{
    let extent = extent(patch, enlarge);

    let keys: Vec<[i64; D]> = extent.iter().collect();
    let points = keys.iter().map(|key| patch.position(*key)).collect();

    let offsets = corner_offsets::<D>();
    let mut cells = Cells::new(cell_type);
    let mut corners = Vec::with_capacity(offsets.len());

    for key in extent.iter() {
        corners.clear();
        for offset in &offsets {
            let mut corner = key;
            for d in 0..D {
                corner[d] += offset[d];
            }
            match extent.linear_index(corner) {
                Some(index) => corners.push(index),
                None => break,
            }
        }
        if corners.len() == offsets.len() {
            cells.push(&corners);
        }
    }

    PatchGeometry {
        extent,
        points,
        keys,
        cells,
    }
}
