//! Emits one `DataArray` per selected property of an element type.
//!
//! Scalars become one single-component array, vectors one multi-component array. Matrices
//! are never written as multi-component arrays: an `R x C` matrix property named `m` is
//! unrolled into `R * C` scalar arrays `m_0_0`, `m_0_1`, ... in row-major order.
//! Unsupported properties produce no array.

use crate::encode::ArrayBuffer;
use crate::options::WriteOptions;
use crate::report::{NanAccumulator, Warning, WriteReport};
use crate::traits::Aggregate;
use crate::types::{PropertyKind, Scalar, ScalarType};
use crate::write_vtk::{self, ArrayHeader, Encoding};
use crate::Error;

use quick_xml::Writer;
use std::io::Write;

/// which properties of the element type are written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PropertySelection {
    /// every property from `0` to `PROPERTY_COUNT - 1`
    #[default]
    All,
    /// the listed property indices, in this order
    Only(Vec<usize>),
}

impl PropertySelection {
    /// `(position in the selection, property index)` pairs to write for `A`. Out of range
    /// indices are reported and dropped; the positions of the others do not move.
    pub(crate) fn resolve<A: Aggregate>(&self, report: &mut WriteReport) -> Vec<(usize, usize)> {
        match self {
            Self::All => (0..A::PROPERTY_COUNT).enumerate().collect(),
            Self::Only(indices) => indices
                .iter()
                .copied()
                .enumerate()
                .filter(|&(_, index)| {
                    let in_range = index < A::PROPERTY_COUNT;
                    if !in_range {
                        report.warn(Warning::PropertyOutOfRange {
                            index,
                            count: A::PROPERTY_COUNT,
                        });
                    }
                    in_range
                })
                .collect(),
        }
    }
}

/// Name of property `index`, written in position `position` of the selection.
///
/// A caller supplied name wins over the name declared by the type, which wins over
/// `attr<index>`.
pub(crate) fn property_name<A: Aggregate>(index: usize, position: usize, names: &[&str]) -> String {
    names
        .get(position)
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .or_else(|| A::property_name(index).map(str::to_string))
        .unwrap_or_else(|| format!("attr{}", index))
}

/// A selected, writable property with its resolved name
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SelectedProperty {
    pub index: usize,
    pub name: String,
    pub kind: PropertyKind,
}

/// resolve the selection of `options` against `A`, dropping unsupported properties
pub(crate) fn select<A: Aggregate>(
    options: &WriteOptions,
    report: &mut WriteReport,
) -> Vec<SelectedProperty> {
    let indices = options.properties.resolve::<A>(report);

    let mut out = Vec::with_capacity(indices.len());
    for (position, index) in indices {
        let kind = A::property_kind(index);
        if !kind.is_supported() {
            report.warn(Warning::SkippedProperty { index });
            continue;
        }
        out.push(SelectedProperty {
            index,
            name: property_name::<A>(index, position, options.names),
            kind,
        });
    }
    out
}

/// One output array: a run of components of one property
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ArrayLayout {
    pub name: String,
    pub property: usize,
    pub scalar_type: ScalarType,
    pub first_component: usize,
    pub components: usize,
}

/// the xml arrays of the selected properties of `A`
pub(crate) fn xml_layout<A: Aggregate>(
    options: &WriteOptions,
    report: &mut WriteReport,
) -> Vec<ArrayLayout> {
    let mut layouts = Vec::new();

    for property in select::<A>(options, report) {
        match property.kind {
            PropertyKind::Scalar(scalar_type) => layouts.push(ArrayLayout {
                name: property.name,
                property: property.index,
                scalar_type,
                first_component: 0,
                components: 1,
            }),
            PropertyKind::Vector(scalar_type, len) => layouts.push(ArrayLayout {
                name: property.name,
                property: property.index,
                scalar_type,
                first_component: 0,
                components: len,
            }),
            PropertyKind::Matrix(scalar_type, rows, columns) => {
                for i in 0..rows {
                    for j in 0..columns {
                        layouts.push(ArrayLayout {
                            name: format!("{}_{}_{}", property.name, i, j),
                            property: property.index,
                            scalar_type,
                            first_component: i * columns + j,
                            components: 1,
                        });
                    }
                }
            }
            PropertyKind::Unsupported => {}
        }
    }

    layouts
}

/// Write a `PointData` or `CellData` section holding one array per layout.
///
/// `elements` yields one item per tuple; `None` items and unreadable components are written
/// as zero. NaN values are written unchanged and recorded in `nan`.
pub(crate) fn write_section<'e, W, A, I>(
    writer: &mut Writer<W>,
    section: &str,
    layouts: &[ArrayLayout],
    elements: I,
    encoding: Encoding,
    nan: &mut NanAccumulator,
) -> Result<(), Error>
where
    W: Write,
    A: Aggregate + 'e,
    I: Iterator<Item = Option<&'e A>> + Clone,
{
    write_vtk::start_element(writer, section, &[])?;

    for layout in layouts {
        let mut buffer = ArrayBuffer::new(encoding, layout.components);
        let mut has_nan = false;

        for element in elements.clone() {
            for c in 0..layout.components {
                let value = element
                    .and_then(|e| e.component(layout.property, layout.first_component + c))
                    .unwrap_or_else(|| Scalar::zero(layout.scalar_type));
                has_nan |= value.is_nan();
                buffer.push(value);
            }
        }

        if has_nan {
            nan.record(&layout.name);
        }

        let header = ArrayHeader::new(layout.scalar_type, &layout.name, encoding)
            .components(layout.components);
        write_vtk::write_data_array(writer, &header, &buffer.finish())?;
    }

    write_vtk::end_element(writer, section)
}
