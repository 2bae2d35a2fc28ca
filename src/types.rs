//! # Types
//!
//! The closed table of value types that can be written to a vtk file. Every property of an
//! element is classified into a [`PropertyKind`] at compile time through the [`VtkValue`]
//! trait. Types that classify as [`PropertyKind::Unsupported`] are skipped by every writer
//! without failing the write.
//!
//! Adding a new writable numeric type means adding a variant to [`ScalarType`] and
//! [`Scalar`] and one line to the `numeric!` invocation below.

use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// the numeric type of a single component as it appears in the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Float32,
    Float64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl ScalarType {
    /// the `type` attribute of an xml `DataArray`
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::Int8 => "Int8",
            Self::UInt8 => "UInt8",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
        }
    }

    /// the data type keyword used by the legacy ascii format
    pub fn legacy_tag(&self) -> &'static str {
        match self {
            Self::Float32 => "float",
            Self::Float64 => "double",
            Self::Int8 => "char",
            Self::UInt8 => "unsigned_char",
            Self::Int16 => "short",
            Self::UInt16 => "unsigned_short",
            Self::Int32 => "int",
            Self::UInt32 => "unsigned_int",
            Self::Int64 => "long",
            Self::UInt64 => "unsigned_long",
        }
    }

    /// width of one value in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Float32 | Self::Int32 | Self::UInt32 => 4,
            Self::Float64 | Self::Int64 | Self::UInt64 => 8,
        }
    }

    /// significant digits used when printing as ascii. Integers are always printed exactly.
    pub fn significant_digits(&self) -> Option<usize> {
        match self {
            Self::Float32 => Some(7),
            Self::Float64 => Some(16),
            _ => None,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }
}

/// one component value, tagged with its output type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    F32(f32),
    F64(f64),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
}

impl Scalar {
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Self::F32(_) => ScalarType::Float32,
            Self::F64(_) => ScalarType::Float64,
            Self::I8(_) => ScalarType::Int8,
            Self::U8(_) => ScalarType::UInt8,
            Self::I16(_) => ScalarType::Int16,
            Self::U16(_) => ScalarType::UInt16,
            Self::I32(_) => ScalarType::Int32,
            Self::U32(_) => ScalarType::UInt32,
            Self::I64(_) => ScalarType::Int64,
            Self::U64(_) => ScalarType::UInt64,
        }
    }

    /// the value written in place of a component that could not be read
    pub fn zero(scalar_type: ScalarType) -> Self {
        match scalar_type {
            ScalarType::Float32 => Self::F32(0.),
            ScalarType::Float64 => Self::F64(0.),
            ScalarType::Int8 => Self::I8(0),
            ScalarType::UInt8 => Self::U8(0),
            ScalarType::Int16 => Self::I16(0),
            ScalarType::UInt16 => Self::U16(0),
            ScalarType::Int32 => Self::I32(0),
            ScalarType::UInt32 => Self::U32(0),
            ScalarType::Int64 => Self::I64(0),
            ScalarType::UInt64 => Self::U64(0),
        }
    }

    pub fn is_nan(&self) -> bool {
        match self {
            Self::F32(x) => x.is_nan(),
            Self::F64(x) => x.is_nan(),
            _ => false,
        }
    }

    /// lossy view of the value, used for comparisons and header attributes
    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::F32(x) => x as f64,
            Self::F64(x) => x,
            Self::I8(x) => x as f64,
            Self::U8(x) => x as f64,
            Self::I16(x) => x as f64,
            Self::U16(x) => x as f64,
            Self::I32(x) => x as f64,
            Self::U32(x) => x as f64,
            Self::I64(x) => x as f64,
            Self::U64(x) => x as f64,
        }
    }
}

/// A primitive with a fixed entry in the [`ScalarType`] table
pub trait Numeric: Copy + Debug + 'static {
    const SCALAR: ScalarType;

    fn to_scalar(self) -> Scalar;
}

/// Floating point type usable for point positions, offsets and spacings
pub trait Coordinate: Numeric + Float + FromPrimitive {}

impl Coordinate for f32 {}
impl Coordinate for f64 {}

/// The shape of one property slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// rank 0
    Scalar(ScalarType),
    /// rank 1, fixed length
    Vector(ScalarType, usize),
    /// rank 2, `rows x columns`, stored row major
    Matrix(ScalarType, usize, usize),
    /// nothing will be written for this property
    Unsupported,
}

impl PropertyKind {
    pub const fn scalar_type(&self) -> Option<ScalarType> {
        match *self {
            Self::Scalar(t) | Self::Vector(t, _) | Self::Matrix(t, _, _) => Some(t),
            Self::Unsupported => None,
        }
    }

    /// total number of scalar components of one value
    pub const fn components(&self) -> usize {
        match *self {
            Self::Scalar(_) => 1,
            Self::Vector(_, len) => len,
            Self::Matrix(_, rows, columns) => rows * columns,
            Self::Unsupported => 0,
        }
    }

    pub const fn rank(&self) -> Option<usize> {
        match self {
            Self::Scalar(_) => Some(0),
            Self::Vector(..) => Some(1),
            Self::Matrix(..) => Some(2),
            Self::Unsupported => None,
        }
    }

    pub const fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Classifies a value type and gives access to its components in row-major order.
///
/// Implemented for every [`Numeric`] primitive, for `[T; N]` (a vector) and `[[T; M]; N]`
/// (an `N x M` matrix). `Vec<T>` and `String` are classified as unsupported so that
/// aggregates carrying them still compile but those slots are skipped on output.
pub trait VtkValue {
    const KIND: PropertyKind;

    /// component `index` of the value, `None` if the index is past the end
    fn component(&self, index: usize) -> Option<Scalar>;
}

macro_rules! numeric {
    ($($ty:ty => $tag:ident, $variant:ident;)*) => {
        $(
            impl Numeric for $ty {
                const SCALAR: ScalarType = ScalarType::$tag;

                #[inline]
                fn to_scalar(self) -> Scalar {
                    Scalar::$variant(self)
                }
            }

            impl VtkValue for $ty {
                const KIND: PropertyKind = PropertyKind::Scalar(ScalarType::$tag);

                #[inline]
                fn component(&self, index: usize) -> Option<Scalar> {
                    (index == 0).then(|| Scalar::$variant(*self))
                }
            }
        )*
    };
}

numeric! {
    f32 => Float32, F32;
    f64 => Float64, F64;
    i8 => Int8, I8;
    u8 => UInt8, U8;
    i16 => Int16, I16;
    u16 => UInt16, U16;
    i32 => Int32, I32;
    u32 => UInt32, U32;
    i64 => Int64, I64;
    u64 => UInt64, U64;
}

// booleans take the smallest integer representation
impl Numeric for bool {
    const SCALAR: ScalarType = ScalarType::Int8;

    fn to_scalar(self) -> Scalar {
        Scalar::I8(self as i8)
    }
}

impl VtkValue for bool {
    const KIND: PropertyKind = PropertyKind::Scalar(ScalarType::Int8);

    fn component(&self, index: usize) -> Option<Scalar> {
        (index == 0).then(|| self.to_scalar())
    }
}

impl<T: VtkValue, const N: usize> VtkValue for [T; N] {
    const KIND: PropertyKind = match T::KIND {
        PropertyKind::Scalar(t) => PropertyKind::Vector(t, N),
        PropertyKind::Vector(t, columns) => PropertyKind::Matrix(t, N, columns),
        _ => PropertyKind::Unsupported,
    };

    fn component(&self, index: usize) -> Option<Scalar> {
        let inner = T::KIND.components();
        if !Self::KIND.is_supported() || inner == 0 {
            return None;
        }
        self.get(index / inner)?.component(index % inner)
    }
}

impl<T> VtkValue for Vec<T> {
    const KIND: PropertyKind = PropertyKind::Unsupported;

    fn component(&self, _index: usize) -> Option<Scalar> {
        None
    }
}

impl VtkValue for String {
    const KIND: PropertyKind = PropertyKind::Unsupported;

    fn component(&self, _index: usize) -> Option<Scalar> {
        None
    }
}
