//! Pieces of the legacy `.vtk` ascii format used by the box and graph writers.

use crate::encode::encode_ascii;
use crate::properties::SelectedProperty;
use crate::report::NanAccumulator;
use crate::traits::Aggregate;
use crate::types::{PropertyKind, Scalar, ScalarType};
use crate::utils;
use crate::Error;

use std::io::Write;

pub(crate) fn write_header<W: Write>(out: &mut W, title: &str, dataset: &str) -> Result<(), Error> {
    writeln!(out, "# vtk DataFile Version 3.0")?;
    // the title is a single line of at most 256 characters
    let title: String = title.lines().next().unwrap_or("").chars().take(256).collect();
    writeln!(out, "{}", title)?;
    writeln!(out, "ASCII")?;
    writeln!(out, "DATASET {}", dataset)?;
    Ok(())
}

/// dataset level `FIELD` block, written right after the `DATASET` line
pub(crate) fn write_field_data<W: Write>(out: &mut W, entries: &[(String, f64)]) -> Result<(), Error> {
    if entries.is_empty() {
        return Ok(());
    }
    writeln!(out, "FIELD FieldData {}", entries.len())?;
    for (name, value) in entries {
        writeln!(out, "{} 1 1 double", name)?;
        writeln!(out, "{}", utils::float_attribute(*value))?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Scalars,
    Vectors,
    Tensors,
}

/// one legacy attribute, listing the property components it takes per tuple (`None` pads)
#[derive(Debug, Clone)]
struct LegacyArray {
    keyword: Keyword,
    name: String,
    property: usize,
    scalar_type: ScalarType,
    components: Vec<Option<usize>>,
    row_len: usize,
}

/// Scalars stay scalars, vectors of up to 3 components become `VECTORS` padded with zeros
/// and 3x3 matrices become `TENSORS`. Any other shape is unrolled into scalars.
fn legacy_layout(selected: &[SelectedProperty]) -> Vec<LegacyArray> {
    let mut out = Vec::new();

    for property in selected {
        let name = property.name.replace(char::is_whitespace, "_");
        let scalars = |name: String, scalar_type, component| LegacyArray {
            keyword: Keyword::Scalars,
            name,
            property: property.index,
            scalar_type,
            components: vec![Some(component)],
            row_len: 1,
        };

        match property.kind {
            PropertyKind::Scalar(t) => out.push(scalars(name, t, 0)),
            PropertyKind::Vector(t, len) if len <= 3 => out.push(LegacyArray {
                keyword: Keyword::Vectors,
                name,
                property: property.index,
                scalar_type: t,
                components: (0..3).map(|c| (c < len).then(|| c)).collect(),
                row_len: 3,
            }),
            PropertyKind::Vector(t, len) => {
                for c in 0..len {
                    out.push(scalars(format!("{}_{}", name, c), t, c));
                }
            }
            PropertyKind::Matrix(t, 3, 3) => out.push(LegacyArray {
                keyword: Keyword::Tensors,
                name,
                property: property.index,
                scalar_type: t,
                components: (0..9).map(Some).collect(),
                row_len: 3,
            }),
            PropertyKind::Matrix(t, rows, columns) => {
                for i in 0..rows {
                    for j in 0..columns {
                        out.push(scalars(format!("{}_{}_{}", name, i, j), t, i * columns + j));
                    }
                }
            }
            PropertyKind::Unsupported => {}
        }
    }

    out
}

/// Write a `POINT_DATA` / `CELL_DATA` section with `count` tuples. Nothing is written when no
/// property was selected.
pub(crate) fn write_attributes<'e, W, A, I>(
    out: &mut W,
    section: &str,
    count: usize,
    selected: &[SelectedProperty],
    elements: I,
    nan: &mut NanAccumulator,
) -> Result<(), Error>
where
    W: Write,
    A: Aggregate + 'e,
    I: Iterator<Item = Option<&'e A>> + Clone,
{
    let arrays = legacy_layout(selected);
    if arrays.is_empty() {
        return Ok(());
    }

    writeln!(out, "{} {}", section, count)?;

    for array in &arrays {
        let tag = array.scalar_type.legacy_tag();
        match array.keyword {
            Keyword::Scalars => {
                writeln!(out, "SCALARS {} {}", array.name, tag)?;
                writeln!(out, "LOOKUP_TABLE default")?;
            }
            Keyword::Vectors => writeln!(out, "VECTORS {} {}", array.name, tag)?,
            Keyword::Tensors => writeln!(out, "TENSORS {} {}", array.name, tag)?,
        }

        let zero = Scalar::zero(array.scalar_type);
        let mut has_nan = false;
        for element in elements.clone() {
            let mut row = Vec::with_capacity(array.row_len);
            for component in &array.components {
                let value = component
                    .and_then(|c| element.and_then(|e| e.component(array.property, c)))
                    .unwrap_or(zero);
                has_nan |= value.is_nan();
                row.push(encode_ascii(value));

                if row.len() == array.row_len {
                    writeln!(out, "{}", row.join(" "))?;
                    row.clear();
                }
            }
        }
        if has_nan {
            nan.record(&array.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected(kind: PropertyKind) -> Vec<SelectedProperty> {
        vec![SelectedProperty {
            index: 0,
            name: "p".to_string(),
            kind,
        }]
    }

    #[test]
    fn vectors_are_padded() {
        let values = [[1.0f32, 2.0], [3.0, 4.0]];
        let mut out = Vec::new();
        let mut nan = NanAccumulator::default();

        write_attributes(
            &mut out,
            "POINT_DATA",
            2,
            &selected(PropertyKind::Vector(ScalarType::Float32, 2)),
            values.iter().map(Some),
            &mut nan,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "POINT_DATA 2\nVECTORS p float\n1 2 0\n3 4 0\n");
    }

    #[test]
    fn tensors_and_unrolled_matrices() {
        let arrays = legacy_layout(&selected(PropertyKind::Matrix(ScalarType::Float64, 3, 3)));
        assert_eq!(arrays.len(), 1);
        assert_eq!(arrays[0].keyword, Keyword::Tensors);

        let arrays = legacy_layout(&selected(PropertyKind::Matrix(ScalarType::Float64, 2, 2)));
        let names: Vec<_> = arrays.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["p_0_0", "p_0_1", "p_1_0", "p_1_1"]);
    }
}
