use crate::report::{Warning, WriteReport};

/// One set of points added to a [`PointSetWriter`](crate::PointSetWriter).
///
/// `positions` and `properties` are parallel arrays. Only the first `n_real` entries are
/// written; the rest (ghost points of a distributed container, for example) are left out.
#[derive(Debug)]
pub struct PointSet<'a, T, P, const D: usize> {
    pub positions: &'a [[T; D]],
    pub properties: &'a [P],
    pub n_real: usize,
}

impl<'a, T, P, const D: usize> Clone for PointSet<'a, T, P, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, P, const D: usize> Copy for PointSet<'a, T, P, D> {}

impl<'a, T, P, const D: usize> PointSet<'a, T, P, D> {
    /// every position is a real point
    pub fn new(positions: &'a [[T; D]], properties: &'a [P]) -> Self {
        Self {
            positions,
            properties,
            n_real: positions.len(),
        }
    }

    pub fn with_real(mut self, n_real: usize) -> Self {
        self.n_real = n_real;
        self
    }

    /// number of points that will be written, reporting disagreeing array lengths.
    /// Missing properties are zero filled later.
    pub(crate) fn resolve_len(&self, report: &mut WriteReport) -> usize {
        let mut len = self.n_real;
        if len > self.positions.len() {
            report.warn(Warning::ShapeMismatch {
                context: "point positions",
                expected: len,
                found: self.positions.len(),
            });
            len = self.positions.len();
        }
        if self.properties.len() < len {
            report.warn(Warning::ShapeMismatch {
                context: "point properties",
                expected: len,
                found: self.properties.len(),
            });
        }
        len
    }
}
