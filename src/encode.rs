//! Value encoding for `DataArray` payloads.
//!
//! Ascii values are printed with a fixed number of significant digits per precision class
//! (7 for `f32`, 16 for `f64`) in the same shortest form as `printf("%g")`. Binary values
//! are accumulated as little endian bytes and framed by [`encode_block`].

use crate::types::Scalar;
use crate::write_vtk::Encoding;

/// print `value` with `digits` significant digits the way `%g` does: fixed notation for
/// moderate exponents, scientific otherwise, trailing zeros removed.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0. { "inf" } else { "-inf" }.to_string();
    }
    if value == 0. {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let digits = digits.max(1);
    // rounding to the requested digits first decides the exponent, as %g does
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return scientific,
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// decimal token of a single value
pub fn encode_ascii(value: Scalar) -> String {
    match value {
        Scalar::F32(x) => format_significant(x as f64, 7),
        Scalar::F64(x) => format_significant(x, 16),
        Scalar::I8(x) => x.to_string(),
        Scalar::U8(x) => x.to_string(),
        Scalar::I16(x) => x.to_string(),
        Scalar::U16(x) => x.to_string(),
        Scalar::I32(x) => x.to_string(),
        Scalar::U32(x) => x.to_string(),
        Scalar::I64(x) => x.to_string(),
        Scalar::U64(x) => x.to_string(),
    }
}

/// append the little endian bytes of `value`. NaN bit patterns are kept as they are.
pub fn encode_binary(value: Scalar, buffer: &mut Vec<u8>) {
    match value {
        Scalar::F32(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::F64(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::I8(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::U8(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::I16(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::U16(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::I32(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::U32(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::I64(x) => buffer.extend_from_slice(&x.to_le_bytes()),
        Scalar::U64(x) => buffer.extend_from_slice(&x.to_le_bytes()),
    }
}

/// Frame a raw payload for a `format="binary"` array: a `u64` little endian byte count,
/// the payload, all of it base64 encoded, followed by a single newline.
pub fn encode_block(payload: &[u8]) -> String {
    let mut framed: Vec<u8> = Vec::with_capacity(payload.len() + 8);
    framed.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    framed.extend_from_slice(payload);

    let mut out = base64::encode(framed.as_slice());
    out.push('\n');
    out
}

/// Accumulates the values of one `DataArray` in either encoding.
///
/// In ascii mode values of a tuple are separated by spaces and each tuple ends with a
/// newline. In binary mode the finished buffer goes through [`encode_block`].
#[derive(Debug)]
pub(crate) struct ArrayBuffer {
    encoding: Encoding,
    row_len: usize,
    in_row: usize,
    text: String,
    bytes: Vec<u8>,
}

impl ArrayBuffer {
    pub(crate) fn new(encoding: Encoding, row_len: usize) -> Self {
        Self {
            encoding,
            row_len: row_len.max(1),
            in_row: 0,
            text: String::new(),
            bytes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, value: Scalar) {
        match self.encoding {
            Encoding::Ascii => {
                if self.in_row > 0 {
                    self.text.push(' ');
                }
                self.text.push_str(&encode_ascii(value));
                self.in_row += 1;
                if self.in_row == self.row_len {
                    self.text.push('\n');
                    self.in_row = 0;
                }
            }
            Encoding::Binary => encode_binary(value, &mut self.bytes),
        }
    }

    /// the text content of the finished `DataArray` element
    pub(crate) fn finish(mut self) -> String {
        match self.encoding {
            Encoding::Ascii => {
                if self.in_row > 0 {
                    self.text.push('\n');
                }
                self.text
            }
            Encoding::Binary => encode_block(&self.bytes),
        }
    }
}
