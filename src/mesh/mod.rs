//! # Mesh Information
//!
//! Geometry shared by the writers. A [`Patch`] is one rectangular structured sub-grid: a
//! reference to caller-owned grid data, a physical origin and spacing, an integer origin on
//! its refinement level and a [`DomainBox`] of the indices that are considered real (the
//! ghost / padding layer is left out).
//!
//! Points of a patch are visited by [`BoxIter`] with the x index varying fastest. A cell is
//! addressed by its lowest corner and its corners follow the vtk winding returned by
//! [`corner_offsets`]: for a quad `(0,0) (1,0) (1,1) (0,1)`, for a hexahedron the same
//! four corners at `z = 0` followed by the same four at `z = 1`.
//!
//! ## Builders
//!
//! * [`grid`]: one patch at a time, implicit connectivity, no deduplication
//! * [`amr`]: every patch of every refinement level merged into one unstructured mesh, with
//!   shared vertices deduplicated through a [`VertexMap`]
//! * [`boxes`]: axis aligned boxes, one cell each
//! * [`graph`]: a plain edge list graph container

pub mod amr;
pub mod boxes;
pub mod dedup;
pub mod graph;
pub mod grid;

pub use boxes::AxisBox;
pub use dedup::VertexMap;
pub use graph::EdgeListGraph;

use crate::traits::GridSource;
use crate::types::Coordinate;
use derive_more::Constructor;

/// VTK cell type, chosen purely from the spatial dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Vertex,
    Line,
    Quad,
    Hexahedron,
}

impl CellType {
    /// cell type of a structured cell in `dim` dimensions
    pub fn from_dimension(dim: usize) -> Option<Self> {
        match dim {
            1 => Some(Self::Line),
            2 => Some(Self::Quad),
            3 => Some(Self::Hexahedron),
            _ => None,
        }
    }

    /// vtk type code
    pub fn code(&self) -> u8 {
        match self {
            Self::Vertex => 1,
            Self::Line => 3,
            Self::Quad => 9,
            Self::Hexahedron => 12,
        }
    }

    pub fn corners(&self) -> usize {
        match self {
            Self::Vertex => 1,
            Self::Line => 2,
            Self::Quad => 4,
            Self::Hexahedron => 8,
        }
    }
}

/// Unit offsets of the corners of a `D` dimensional cell, in vtk winding order.
///
/// Corner `c` has bit `d` of `c` as its offset along `d`, except along x where the first
/// two bits are combined so the corners of every face run around its boundary.
pub fn corner_offsets<const D: usize>() -> Vec<[i64; D]> {
    (0..1usize << D)
        .map(|c| {
            let mut offset = [0i64; D];
            for (d, o) in offset.iter_mut().enumerate() {
                let bit = (c >> d) & 1;
                *o = if d == 0 { (bit ^ ((c >> 1) & 1)) as i64 } else { bit as i64 };
            }
            offset
        })
        .collect()
}

/// Inclusive range of integer indices in `D` dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct DomainBox<const D: usize> {
    pub low: [i64; D],
    pub high: [i64; D],
}

impl<const D: usize> DomainBox<D> {
    /// a box covering `[0, size - 1]` along every dimension
    pub fn from_size(size: [usize; D]) -> Self {
        let mut high = [0; D];
        for d in 0..D {
            high[d] = size[d] as i64 - 1;
        }
        Self::new([0; D], high)
    }

    /// number of indices along each dimension
    pub fn lengths(&self) -> [usize; D] {
        let mut out = [0; D];
        for d in 0..D {
            out[d] = (self.high[d] - self.low[d] + 1).max(0) as usize;
        }
        out
    }

    pub fn num_points(&self) -> usize {
        self.lengths().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    pub fn contains(&self, key: [i64; D]) -> bool {
        (0..D).all(|d| key[d] >= self.low[d] && key[d] <= self.high[d])
    }

    /// grow the upper bound by `layers` along every dimension
    pub fn enlarge_upper(mut self, layers: i64) -> Self {
        self.high.iter_mut().for_each(|h| *h += layers);
        self
    }

    /// position of `key` in iteration order, `None` outside the box
    pub fn linear_index(&self, key: [i64; D]) -> Option<usize> {
        if !self.contains(key) {
            return None;
        }
        let lengths = self.lengths();
        let mut stride = 1;
        let mut index = 0;
        for d in 0..D {
            index += (key[d] - self.low[d]) as usize * stride;
            stride *= lengths[d];
        }
        Some(index)
    }

    pub fn iter(&self) -> BoxIter<D> {
        BoxIter {
            domain: *self,
            current: (!self.is_empty()).then(|| self.low),
        }
    }
}

impl<const D: usize> IntoIterator for DomainBox<D> {
    type Item = [i64; D];
    type IntoIter = BoxIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walks every index of a [`DomainBox`], x fastest
#[derive(Debug, Clone)]
pub struct BoxIter<const D: usize> {
    domain: DomainBox<D>,
    current: Option<[i64; D]>,
}

impl<const D: usize> Iterator for BoxIter<D> {
    type Item = [i64; D];

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current?;

        let mut next = out;
        let mut d = 0;
        loop {
            if d == D {
                self.current = None;
                break;
            }
            if next[d] < self.domain.high[d] {
                next[d] += 1;
                self.current = Some(next);
                break;
            }
            next[d] = self.domain.low[d];
            d += 1;
        }

        Some(out)
    }
}

/// Connectivity of cells that all have the same type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cells {
    cell_type: CellType,
    connectivity: Vec<usize>,
}

impl Cells {
    pub fn new(cell_type: CellType) -> Self {
        Self {
            cell_type,
            connectivity: Vec::new(),
        }
    }

    /// one `Vertex` cell per point
    pub fn vertices(points: usize) -> Self {
        Self {
            cell_type: CellType::Vertex,
            connectivity: (0..points).collect(),
        }
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    pub fn push(&mut self, corners: &[usize]) {
        debug_assert_eq!(corners.len(), self.cell_type.corners());
        self.connectivity.extend_from_slice(corners);
    }

    /// append the cells of `other` with every point index moved by `shift`
    pub fn append_shifted(&mut self, other: &Cells, shift: usize) {
        self.connectivity
            .extend(other.connectivity.iter().map(|index| index + shift));
    }

    pub fn connectivity(&self) -> &[usize] {
        &self.connectivity
    }

    pub fn len(&self) -> usize {
        self.connectivity.len() / self.cell_type.corners()
    }

    pub fn is_empty(&self) -> bool {
        self.connectivity.is_empty()
    }
}

/// One structured sub-grid added to a writer
#[derive(Debug)]
pub struct Patch<'a, G, T, const D: usize> {
    pub grid: &'a G,
    /// physical position of local index zero
    pub offset: [T; D],
    /// index of local index zero on the patch's refinement level
    pub offset_i: [i64; D],
    pub spacing: [T; D],
    pub domain: DomainBox<D>,
}

// manual impls so that `G` does not need to be `Clone`
impl<'a, G, T: Copy, const D: usize> Clone for Patch<'a, G, T, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, G, T: Copy, const D: usize> Copy for Patch<'a, G, T, D> {}

impl<'a, G, T, const D: usize> Patch<'a, G, T, D>
where
    G: GridSource<D>,
    T: Coordinate,
{
    pub fn new(grid: &'a G, offset: [T; D], spacing: [T; D], domain: DomainBox<D>) -> Self {
        Self {
            grid,
            offset,
            offset_i: [0; D],
            spacing,
            domain,
        }
    }

    /// a patch whose domain is the whole grid
    pub fn whole(grid: &'a G, offset: [T; D], spacing: [T; D]) -> Self {
        let domain = DomainBox::from_size(grid.size());
        Self::new(grid, offset, spacing, domain)
    }

    pub fn with_index_offset(mut self, offset_i: [i64; D]) -> Self {
        self.offset_i = offset_i;
        self
    }

    /// physical position of local index `key`
    pub fn position(&self, key: [i64; D]) -> [T; D] {
        let mut out = self.offset;
        for d in 0..D {
            let k = T::from_i64(key[d]).unwrap_or_else(T::zero);
            out[d] = self.offset[d] + k * self.spacing[d];
        }
        out
    }

    /// index of local `key` on the refinement level
    pub fn global_index(&self, key: [i64; D]) -> [i64; D] {
        let mut out = key;
        for d in 0..D {
            out[d] += self.offset_i[d];
        }
        out
    }

    /// the grid node at local `key`, `None` when it is outside the backing grid
    pub fn value(&self, key: [i64; D]) -> Option<&'a G::Element> {
        let mut index = [0usize; D];
        for d in 0..D {
            index[d] = usize::try_from(key[d]).ok()?;
        }
        self.grid.get(index)
    }
}
