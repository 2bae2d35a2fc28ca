//! [`GridSource`](crate::GridSource) for `ndarray` containers.
//!
//! Arrays are indexed `[x, y, z]`, matching the key order the writers use. Any element type
//! works; it only has to implement [`Aggregate`](crate::Aggregate) to be written.

use crate::traits::GridSource;
use ndarray::{ArrayBase, Data, Ix1, Ix2, Ix3};

impl<S, A> GridSource<1> for ArrayBase<S, Ix1>
where
    S: Data<Elem = A>,
{
    type Element = A;

    fn size(&self) -> [usize; 1] {
        [self.len()]
    }

    fn get(&self, key: [usize; 1]) -> Option<&A> {
        ArrayBase::get(self, key[0])
    }
}

impl<S, A> GridSource<2> for ArrayBase<S, Ix2>
where
    S: Data<Elem = A>,
{
    type Element = A;

    fn size(&self) -> [usize; 2] {
        let (nx, ny) = self.dim();
        [nx, ny]
    }

    fn get(&self, key: [usize; 2]) -> Option<&A> {
        ArrayBase::get(self, (key[0], key[1]))
    }
}

impl<S, A> GridSource<3> for ArrayBase<S, Ix3>
where
    S: Data<Elem = A>,
{
    type Element = A;

    fn size(&self) -> [usize; 3] {
        let (nx, ny, nz) = self.dim();
        [nx, ny, nz]
    }

    fn get(&self, key: [usize; 3]) -> Option<&A> {
        ArrayBase::get(self, (key[0], key[1], key[2]))
    }
}
