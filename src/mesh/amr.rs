//! Merge the patches of every refinement level into one unstructured mesh.
//!
//! Every level has a conceptual grid of lines with `size[d] + 1` lines per dimension. The
//! lines of all levels are numbered contiguously, level after level, so each vertex of each
//! level has exactly one global key:
//!
//! ```text
//! key = base(level) + g[0] + g[1] * lines[0] + g[2] * lines[0] * lines[1]
//! ```
//!
//! where `g` is the index of the vertex on its level and `base(level)` is the number of
//! lines of all coarser levels. Two patches touching the same vertex compute the same key and
//! the [`VertexMap`] emits it once.
//!
//! Cells are built in a second pass over the same vertices. A cell is only emitted when all
//! of its corners were registered in the first pass, so cells reaching into vertices that no
//! patch owns are dropped.

use super::{corner_offsets, CellType, Cells, Patch, VertexMap};
use crate::report::{Warning, WriteReport};
use crate::traits::GridSource;
use crate::types::Coordinate;
use hashbrown::HashSet;

/// where an output point came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointSource<const D: usize> {
    /// position of the patch in the writer
    pub patch: usize,
    /// local index inside the patch
    pub key: [i64; D],
}

/// global vertex numbering of a set of refinement levels
#[derive(Debug, Clone)]
pub struct LevelLayout<const D: usize> {
    lines: Vec<[usize; D]>,
    bases: Vec<u64>,
}

impl<const D: usize> LevelLayout<D> {
    /// `sizes[l]` is the number of cells of level `l` along each dimension
    pub fn new(sizes: &[[usize; D]]) -> Self {
        let mut lines = Vec::with_capacity(sizes.len());
        let mut bases = Vec::with_capacity(sizes.len());
        let mut base = 0u64;

        for size in sizes {
            let mut level_lines = [0; D];
            for d in 0..D {
                level_lines[d] = size[d] + 1;
            }
            bases.push(base);
            base += level_lines.iter().map(|l| *l as u64).product::<u64>();
            lines.push(level_lines);
        }

        Self { lines, bases }
    }

    pub fn levels(&self) -> usize {
        self.lines.len()
    }

    /// global key of vertex `g` on `level`, `None` if it is outside the level
    pub fn key(&self, level: usize, g: [i64; D]) -> Option<u64> {
        let lines = self.lines.get(level)?;
        let mut key = 0u64;
        let mut stride = 1u64;
        for d in 0..D {
            if g[d] < 0 || g[d] as usize >= lines[d] {
                return None;
            }
            key += g[d] as u64 * stride;
            stride *= lines[d] as u64;
        }
        Some(self.bases[level] + key)
    }
}

/// deduplicated points and cells of all patches
#[derive(Debug, Clone)]
pub struct AmrGeometry<T, const D: usize> {
    pub points: Vec<[T; D]>,
    pub sources: Vec<PointSource<D>>,
    pub cells: Cells,
}

/// Run both passes over `patches`, given as `(level, patch)` pairs in the order they were
/// added. Patches on undeclared levels are skipped with a warning.
pub fn build<G, T, const D: usize>(
    layout: &LevelLayout<D>,
    patches: &[(usize, Patch<G, T, D>)],
    cell_type: CellType,
    report: &mut WriteReport,
) -> AmrGeometry<T, D>
where
    G: GridSource<D>,
    T: Coordinate,
{
    let capacity = patches.iter().map(|(_, p)| p.domain.num_points()).sum();
    let mut map = VertexMap::with_capacity(capacity);
    let mut points = Vec::with_capacity(capacity);
    let mut sources = Vec::with_capacity(capacity);

    // walk levels in order so coarser vertices are numbered first
    let mut order: Vec<usize> = (0..patches.len()).collect();
    order.sort_by_key(|i| patches[*i].0);

    for &index in &order {
        let (level, patch) = &patches[index];
        if *level >= layout.levels() {
            report.warn(Warning::UndeclaredLevel {
                level: *level,
                patch: index,
            });
            continue;
        }

        let mut skipped = 0;
        for key in patch.domain.iter() {
            let vertex = match layout.key(*level, patch.global_index(key)) {
                Some(vertex) => vertex,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            let (_, is_new) = map.lookup_or_register(vertex);
            if is_new {
                points.push(patch.position(key));
                sources.push(PointSource { patch: index, key });
            }
        }

        if skipped > 0 {
            report.warn(Warning::OutsideLevel {
                level: *level,
                patch: index,
                skipped,
            });
        }
    }

    let offsets = corner_offsets::<D>();
    let mut cells = Cells::new(cell_type);
    let mut emitted: HashSet<u64> = HashSet::new();
    let mut corners = Vec::with_capacity(offsets.len());

    for &index in &order {
        let (level, patch) = &patches[index];
        if *level >= layout.levels() {
            continue;
        }

        for key in patch.domain.iter() {
            let base = patch.global_index(key);
            let base_key = match layout.key(*level, base) {
                Some(base_key) => base_key,
                None => continue,
            };

            corners.clear();
            for offset in &offsets {
                let mut corner = base;
                for d in 0..D {
                    corner[d] += offset[d];
                }
                match layout.key(*level, corner).and_then(|k| map.get(k)) {
                    Some(point) => corners.push(point),
                    None => break,
                }
            }

            // overlapping patches reach the same cell more than once
            if corners.len() == offsets.len() && emitted.insert(base_key) {
                cells.push(&corners);
            }
        }
    }

    log::debug!(
        "merged {} patches into {} points and {} cells",
        patches.len(),
        points.len(),
        cells.len()
    );

    AmrGeometry {
        points,
        sources,
        cells,
    }
}
