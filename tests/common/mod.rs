//! Reads back written xml documents for assertions.
#![allow(dead_code)]

use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: HashMap<String, String>,
}

impl Element {
    pub fn attr(&self, key: &str) -> &str {
        self.attributes
            .get(key)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("`{}` has no attribute `{}`", self.name, key))
    }
}

#[derive(Debug, Clone)]
pub struct ParsedArray {
    pub element: Element,
    /// the element enclosing the array: `Points`, `Cells`, `PointData`, ...
    pub section: String,
    /// index of the enclosing `Piece`
    pub piece: Option<usize>,
    pub text: String,
}

impl ParsedArray {
    pub fn name(&self) -> Option<&str> {
        self.element.attributes.get("Name").map(String::as_str)
    }

    pub fn components(&self) -> usize {
        self.element.attr("NumberOfComponents").parse().unwrap()
    }

    /// decoded values, whatever the encoding
    pub fn values(&self) -> Vec<f64> {
        match self.element.attr("format") {
            "ascii" => self
                .text
                .split_whitespace()
                .map(|token| token.parse::<f64>().unwrap())
                .collect(),
            "binary" => decode_binary(&self.text, self.element.attr("type")),
            other => panic!("unexpected format {}", other),
        }
    }
}

/// base64 decode a block, check its length prefix and decode the payload
pub fn decode_binary(text: &str, type_tag: &str) -> Vec<f64> {
    let bytes = base64::decode(text.trim()).unwrap();
    let (prefix, payload) = bytes.split_at(8);
    let mut len = [0u8; 8];
    len.copy_from_slice(prefix);
    assert_eq!(u64::from_le_bytes(len) as usize, payload.len());

    macro_rules! decode {
        ($ty:ty) => {
            payload
                .chunks_exact(std::mem::size_of::<$ty>())
                .map(|chunk| {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(chunk);
                    <$ty>::from_le_bytes(raw) as f64
                })
                .collect()
        };
    }

    match type_tag {
        "Float32" => decode!(f32),
        "Float64" => decode!(f64),
        "Int8" => decode!(i8),
        "UInt8" => decode!(u8),
        "Int32" => decode!(i32),
        "Int64" => decode!(i64),
        "UInt64" => decode!(u64),
        other => panic!("unexpected type {}", other),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Document {
    pub elements: Vec<Element>,
    pub arrays: Vec<ParsedArray>,
}

impl Document {
    pub fn named(&self, name: &str) -> Vec<&Element> {
        self.elements.iter().filter(|e| e.name == name).collect()
    }

    pub fn pieces(&self) -> Vec<&Element> {
        self.named("Piece")
    }

    /// the arrays of one section, for example `PointData` of piece `0`
    pub fn section(&self, section: &str, piece: usize) -> Vec<&ParsedArray> {
        self.arrays
            .iter()
            .filter(|a| a.section == section && a.piece == Some(piece))
            .collect()
    }

    pub fn array(&self, section: &str, piece: usize, name: &str) -> &ParsedArray {
        self.section(section, piece)
            .into_iter()
            .find(|a| a.name() == Some(name))
            .unwrap_or_else(|| panic!("no array {} in {} of piece {}", name, section, piece))
    }
}

fn element(start: &quick_xml::events::BytesStart) -> Element {
    let name = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
    let attributes = start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.unwrap();
            let key = String::from_utf8(attribute.key.as_ref().to_vec()).unwrap();
            let value = attribute.unescape_value().unwrap().into_owned();
            (key, value)
        })
        .collect();
    Element { name, attributes }
}

pub fn parse(xml: &str) -> Document {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut document = Document::default();
    let mut stack: Vec<String> = Vec::new();
    let mut piece: Option<usize> = None;
    let mut n_pieces = 0;
    let mut open_array: Option<ParsedArray> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let element = element(&start);
                if element.name == "Piece" {
                    piece = Some(n_pieces);
                    n_pieces += 1;
                }
                if element.name == "DataArray" {
                    open_array = Some(ParsedArray {
                        element: element.clone(),
                        section: stack.last().cloned().unwrap_or_default(),
                        piece,
                        text: String::new(),
                    });
                }
                stack.push(element.name.clone());
                document.elements.push(element);
            }
            Ok(Event::Empty(start)) => {
                document.elements.push(element(&start));
            }
            Ok(Event::Text(text)) => {
                if let Some(array) = open_array.as_mut() {
                    array.text.push_str(&text.unescape().unwrap());
                }
            }
            Ok(Event::End(_)) => {
                if stack.pop().as_deref() == Some("DataArray") {
                    if let Some(array) = open_array.take() {
                        document.arrays.push(array);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("invalid xml at {}: {}", reader.buffer_position(), e),
            _ => {}
        }
    }

    document
}

pub fn read(path: &std::path::Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
