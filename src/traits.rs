//! # Traits
//!
//! These are the seams between caller-owned simulation data and the writers. An element
//! type (a point, grid node, graph vertex or edge) describes its properties through
//! [`Aggregate`], which can be derived with the `derive` feature. Structured patches are
//! read through [`GridSource`] and graphs through [`GraphSource`].
//!

use crate::types::{PropertyKind, Scalar, VtkValue};

/// A fixed, compile-time list of properties carried by every element of a dataset.
///
/// The recommended way of using this trait is deriving:
///
/// ```ignore
/// #[derive(vtk_writer::Aggregate)]
/// struct Particle {
///     #[vtk(name = "scalar")]
///     pressure: f32,
///     velocity: [f32; 3],
///     // written as 9 scalar arrays `stress_0_0` .. `stress_2_2`
///     stress: [[f64; 3]; 3],
///     // not writable, the slot is skipped on output
///     neighbours: Vec<usize>,
/// }
/// ```
///
/// Tuples of up to 8 [`VtkValue`]s and every bare numeric type implement `Aggregate`
/// already, so `(f64, [f64; 3])` works as the element type of a grid without a derive.
pub trait Aggregate {
    /// number of property slots, including unsupported ones
    const PROPERTY_COUNT: usize;

    /// shape of the property at `index`. Out of range indices are unsupported.
    fn property_kind(index: usize) -> PropertyKind;

    /// name declared by the type for the property at `index`
    fn property_name(_index: usize) -> Option<&'static str> {
        None
    }

    /// component `component` (row-major) of property `property`
    fn component(&self, property: usize, component: usize) -> Option<Scalar>;
}

impl Aggregate for () {
    const PROPERTY_COUNT: usize = 0;

    fn property_kind(_index: usize) -> PropertyKind {
        PropertyKind::Unsupported
    }

    fn component(&self, _property: usize, _component: usize) -> Option<Scalar> {
        None
    }
}

macro_rules! single_property {
    ($($ty:ty),*) => {
        $(
            impl Aggregate for $ty {
                const PROPERTY_COUNT: usize = 1;

                fn property_kind(index: usize) -> PropertyKind {
                    match index {
                        0 => <$ty as VtkValue>::KIND,
                        _ => PropertyKind::Unsupported,
                    }
                }

                fn component(&self, property: usize, component: usize) -> Option<Scalar> {
                    match property {
                        0 => VtkValue::component(self, component),
                        _ => None,
                    }
                }
            }
        )*
    };
}

single_property!(f32, f64, i8, u8, i16, u16, i32, u32, i64, u64, bool);

impl<T: VtkValue, const N: usize> Aggregate for [T; N] {
    const PROPERTY_COUNT: usize = 1;

    fn property_kind(index: usize) -> PropertyKind {
        match index {
            0 => <Self as VtkValue>::KIND,
            _ => PropertyKind::Unsupported,
        }
    }

    fn component(&self, property: usize, component: usize) -> Option<Scalar> {
        match property {
            0 => VtkValue::component(self, component),
            _ => None,
        }
    }
}

macro_rules! tuple_aggregate {
    ($count:expr; $($name:ident: $idx:tt),+) => {
        impl<$($name: VtkValue),+> Aggregate for ($($name,)+) {
            const PROPERTY_COUNT: usize = $count;

            fn property_kind(index: usize) -> PropertyKind {
                match index {
                    $($idx => $name::KIND,)+
                    _ => PropertyKind::Unsupported,
                }
            }

            fn component(&self, property: usize, component: usize) -> Option<Scalar> {
                match property {
                    $($idx => self.$idx.component(component),)+
                    _ => None,
                }
            }
        }
    };
}

tuple_aggregate!(1; A: 0);
tuple_aggregate!(2; A: 0, B: 1);
tuple_aggregate!(3; A: 0, B: 1, C: 2);
tuple_aggregate!(4; A: 0, B: 1, C: 2, D: 3);
tuple_aggregate!(5; A: 0, B: 1, C: 2, D: 3, E: 4);
tuple_aggregate!(6; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
tuple_aggregate!(7; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
tuple_aggregate!(8; A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);

/// Read access to the nodes of one structured `D` dimensional grid.
///
/// `key[0]` is the fastest varying (x) index when the writers walk a patch. The trait is
/// implemented for one, two and three dimensional `ndarray` arrays indexed as `[x, y, z]`.
pub trait GridSource<const D: usize> {
    type Element;

    /// number of nodes along each dimension
    fn size(&self) -> [usize; D];

    /// the node at `key`, `None` outside the grid
    fn get(&self, key: [usize; D]) -> Option<&Self::Element>;
}

impl<G, const D: usize> GridSource<D> for &G
where
    G: GridSource<D>,
{
    type Element = G::Element;

    fn size(&self) -> [usize; D] {
        (**self).size()
    }

    fn get(&self, key: [usize; D]) -> Option<&Self::Element> {
        (**self).get(key)
    }
}

/// Vertices and directed edges of a graph with per-vertex and per-edge properties
pub trait GraphSource {
    type Vertex: Aggregate;
    type Edge: Aggregate;

    fn vertex_count(&self) -> usize;

    fn vertex(&self, id: usize) -> Option<&Self::Vertex>;

    fn edge_count(&self) -> usize;

    /// `(source, destination, properties)` of edge `id`
    fn edge(&self, id: usize) -> Option<(usize, usize, &Self::Edge)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ScalarType;

    #[test]
    fn tuple_properties() {
        type Element = (f32, [f32; 3], Vec<u8>);
        assert_eq!(Element::PROPERTY_COUNT, 3);
        assert_eq!(
            Element::property_kind(1),
            PropertyKind::Vector(ScalarType::Float32, 3)
        );
        assert_eq!(Element::property_kind(2), PropertyKind::Unsupported);
        assert_eq!(Element::property_kind(3), PropertyKind::Unsupported);

        let value: Element = (1.5, [1., 2., 3.], vec![]);
        assert_eq!(value.component(0, 0), Some(Scalar::F32(1.5)));
        assert_eq!(value.component(1, 2), Some(Scalar::F32(3.)));
        assert_eq!(value.component(2, 0), None);
    }
}
