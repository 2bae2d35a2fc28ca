use crate::encode::{encode_block, ArrayBuffer};
use crate::mesh::Cells;
use crate::types::{Coordinate, Scalar, ScalarType};
use crate::utils;
use crate::Error;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// the encoding used for every inline `DataArray` of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Ascii,
    Binary,
}

impl Encoding {
    /// value of the `format` attribute
    pub fn to_str(&self) -> &'static str {
        match &self {
            Self::Ascii => "ascii",
            Self::Binary => "binary",
        }
    }
}

pub(crate) fn xml_writer<W: Write>(inner: W) -> Writer<W> {
    Writer::new_with_indent(inner, b' ', 2)
}

/// write the xml declaration, open `VTKFile` and the dataset element `kind`
pub(crate) fn start_document<W: Write>(
    writer: &mut Writer<W>,
    kind: &str,
    attributes: &[(&str, &str)],
) -> Result<(), Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let file = BytesStart::new("VTKFile").with_attributes([
        ("type", kind),
        ("version", "1.0"),
        ("byte_order", "LittleEndian"),
        ("header_type", "UInt64"),
    ]);
    writer.write_event(Event::Start(file))?;

    start_element(writer, kind, attributes)
}

pub(crate) fn end_document<W: Write>(writer: &mut Writer<W>, kind: &str) -> Result<(), Error> {
    end_element(writer, kind)?;
    end_element(writer, "VTKFile")
}

pub(crate) fn start_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), Error> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    writer.write_event(Event::Start(element))?;
    Ok(())
}

pub(crate) fn empty_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
) -> Result<(), Error> {
    let element = BytesStart::new(name).with_attributes(attributes.iter().copied());
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

pub(crate) fn end_element<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), Error> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// attributes of one inline `DataArray`
#[derive(Debug, Clone, Copy)]
pub(crate) struct ArrayHeader<'a> {
    pub scalar_type: ScalarType,
    pub name: Option<&'a str>,
    pub components: usize,
    pub tuples: Option<usize>,
    pub encoding: Encoding,
}

impl<'a> ArrayHeader<'a> {
    pub(crate) fn new(scalar_type: ScalarType, name: &'a str, encoding: Encoding) -> Self {
        Self {
            scalar_type,
            name: Some(name),
            components: 1,
            tuples: None,
            encoding,
        }
    }

    pub(crate) fn components(mut self, components: usize) -> Self {
        self.components = components;
        self
    }
}

/// write a complete inline `DataArray` whose text has already been encoded
pub(crate) fn write_data_array<W: Write>(
    writer: &mut Writer<W>,
    header: &ArrayHeader,
    content: &str,
) -> Result<(), Error> {
    let components = header.components.to_string();
    let tuples = header.tuples.map(|t| t.to_string());

    let mut element = BytesStart::new("DataArray");
    element.push_attribute(("type", header.scalar_type.type_tag()));
    if let Some(name) = header.name {
        element.push_attribute(("Name", name));
    }
    element.push_attribute(("NumberOfComponents", components.as_str()));
    if let Some(tuples) = &tuples {
        element.push_attribute(("NumberOfTuples", tuples.as_str()));
    }
    element.push_attribute(("format", header.encoding.to_str()));

    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    end_element(writer, "DataArray")
}

/// `<Points>` with every position padded to three components
pub(crate) fn write_points<'p, W, T, I, const D: usize>(
    writer: &mut Writer<W>,
    points: I,
    encoding: Encoding,
) -> Result<(), Error>
where
    W: Write,
    T: Coordinate,
    I: IntoIterator<Item = &'p [T; D]>,
{
    let mut buffer = ArrayBuffer::new(encoding, 3);
    for point in points {
        for d in 0..3 {
            let value = point.get(d).copied().unwrap_or_else(T::zero);
            buffer.push(value.to_scalar());
        }
    }

    start_element(writer, "Points", &[])?;
    let header = ArrayHeader::new(T::SCALAR, "Points", encoding).components(3);
    write_data_array(writer, &header, &buffer.finish())?;
    end_element(writer, "Points")
}

/// `<Cells>` with connectivity, offsets and cell type codes
pub(crate) fn write_cells<W: Write>(
    writer: &mut Writer<W>,
    cells: &Cells,
    encoding: Encoding,
) -> Result<(), Error> {
    start_element(writer, "Cells", &[])?;
    write_topology(writer, cells, encoding)?;

    let mut types = ArrayBuffer::new(encoding, 1);
    for _ in 0..cells.len() {
        types.push(Scalar::U8(cells.cell_type().code()));
    }
    let header = ArrayHeader::new(ScalarType::UInt8, "types", encoding);
    write_data_array(writer, &header, &types.finish())?;

    end_element(writer, "Cells")
}

/// connectivity and offsets arrays shared by `Cells`, `Verts` and `Lines`
pub(crate) fn write_topology<W: Write>(
    writer: &mut Writer<W>,
    cells: &Cells,
    encoding: Encoding,
) -> Result<(), Error> {
    let corners = cells.cell_type().corners();

    let mut connectivity = ArrayBuffer::new(encoding, corners);
    for index in cells.connectivity() {
        connectivity.push(Scalar::I64(*index as i64));
    }
    let header = ArrayHeader::new(ScalarType::Int64, "connectivity", encoding);
    write_data_array(writer, &header, &connectivity.finish())?;

    let mut offsets = ArrayBuffer::new(encoding, 1);
    for cell in 0..cells.len() {
        offsets.push(Scalar::I64(((cell + 1) * corners) as i64));
    }
    let header = ArrayHeader::new(ScalarType::Int64, "offsets", encoding);
    write_data_array(writer, &header, &offsets.finish())
}

/// `<FieldData>` holding one single-tuple `Float64` array per entry
pub(crate) fn write_field_data<W: Write>(
    writer: &mut Writer<W>,
    entries: &[(String, f64)],
    encoding: Encoding,
) -> Result<(), Error> {
    if entries.is_empty() {
        return Ok(());
    }

    start_element(writer, "FieldData", &[])?;
    for (name, value) in entries {
        // header values are written back exactly as they were given
        let content = match encoding {
            Encoding::Ascii => format!("{}\n", utils::float_attribute(*value)),
            Encoding::Binary => encode_block(&value.to_le_bytes()),
        };

        let mut header = ArrayHeader::new(ScalarType::Float64, name, encoding);
        header.tuples = Some(1);
        write_data_array(writer, &header, &content)?;
    }
    end_element(writer, "FieldData")
}

/// flush the finished document into its sink
pub(crate) fn finish<W: Write>(writer: Writer<W>) -> Result<(), Error> {
    let mut inner = writer.into_inner();
    inner.flush()?;
    Ok(())
}
