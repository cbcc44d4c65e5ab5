//! # DL/T 645 Value Encoding and Decoding
//!
//! Meter values travel as binary-coded decimal, least significant byte first.
//! This module provides the BCD value codec used by the response interpreter
//! (width, byte order, ratio, offset and unit) and the value shapes accepted by
//! the frame builders.
//!
//! ## Example
//!
//! ```rust
//! use dlt645_rs::payload::data_encoding::{encode_bcd, ByteOrder, ValueCodec};
//!
//! // Phase voltage: 2 bytes, XXX.X V
//! let codec = ValueCodec::new(2, ByteOrder::Little, 0.1, 0.0, "V").unwrap();
//! let wire = encode_bcd(2219, 2).unwrap();
//! assert_eq!(wire, vec![0x19, 0x22]);
//! let values = codec.decode(&wire).unwrap();
//! assert!((values[0] - 221.9).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Dlt645Error;

/// Byte order of a multi-byte BCD value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    /// Least significant byte first (the DL/T 645 convention).
    #[default]
    Little,
    Big,
}

/// Decoding rule for the values carried under one data identifier.
///
/// Each `width`-byte chunk is read as a BCD integer `n` and reported as
/// `n * ratio - offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueCodec {
    width: usize,
    order: ByteOrder,
    ratio: f64,
    offset: f64,
    unit: String,
}

impl ValueCodec {
    pub fn new(
        width: usize,
        order: ByteOrder,
        ratio: f64,
        offset: f64,
        unit: impl Into<String>,
    ) -> Result<Self, Dlt645Error> {
        if width == 0 {
            return Err(Dlt645Error::InvalidCodecConfig(
                "width must be positive".to_string(),
            ));
        }
        if ratio == 0.0 || !ratio.is_finite() {
            return Err(Dlt645Error::InvalidCodecConfig(format!(
                "ratio must be finite and non-zero, got {ratio}"
            )));
        }
        if !offset.is_finite() {
            return Err(Dlt645Error::InvalidCodecConfig(format!(
                "offset must be finite, got {offset}"
            )));
        }
        Ok(Self {
            width,
            order,
            ratio,
            offset,
            unit: unit.into(),
        })
    }

    /// Little-endian codec without offset, the common case.
    pub fn scaled(width: usize, ratio: f64, unit: impl Into<String>) -> Result<Self, Dlt645Error> {
        Self::new(width, ByteOrder::Little, ratio, 0.0, unit)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Decodes every chunk of `data`; one value per `width` bytes.
    pub fn decode(&self, data: &[u8]) -> Result<Vec<f64>, Dlt645Error> {
        decode_bcd_values(data, self.width, self.order, self.ratio, self.offset)
    }
}

/// Reads BCD digit pairs, most significant byte first, as one integer.
pub fn decode_bcd_digits<'a, I>(bytes: I) -> Result<u64, Dlt645Error>
where
    I: IntoIterator<Item = &'a u8>,
{
    let mut value = 0u64;
    let mut count = 0usize;
    for &byte in bytes {
        let (hi, lo) = (byte >> 4, byte & 0x0F);
        if hi > 9 || lo > 9 {
            return Err(Dlt645Error::InvalidBcdDigit(byte));
        }
        count += 1;
        value = value
            .checked_mul(100)
            .and_then(|v| v.checked_add(u64::from(hi * 10 + lo)))
            .ok_or(Dlt645Error::ValueOverflow { width: count })?;
    }
    Ok(value)
}

/// Splits `data` into `width`-byte chunks and decodes each as a scaled BCD value.
pub fn decode_bcd_values(
    data: &[u8],
    width: usize,
    order: ByteOrder,
    ratio: f64,
    offset: f64,
) -> Result<Vec<f64>, Dlt645Error> {
    if width == 0 {
        return Err(Dlt645Error::InvalidCodecConfig(
            "width must be positive".to_string(),
        ));
    }
    if data.len() % width != 0 {
        return Err(Dlt645Error::ValueLengthMismatch {
            len: data.len(),
            width,
        });
    }

    data.chunks_exact(width)
        .map(|chunk| {
            let raw = match order {
                ByteOrder::Little => decode_bcd_digits(chunk.iter().rev())?,
                ByteOrder::Big => decode_bcd_digits(chunk)?,
            };
            Ok(raw as f64 * ratio - offset)
        })
        .collect()
}

/// Encodes `value` as `width` BCD bytes, least significant byte first.
///
/// Values needing more than `2 * width` decimal digits are rejected rather
/// than truncated.
pub fn encode_bcd(value: u64, width: usize) -> Result<Vec<u8>, Dlt645Error> {
    if width == 0 {
        return Err(Dlt645Error::ValueEncode(
            "width must be greater than 0".to_string(),
        ));
    }

    let mut out = Vec::with_capacity(width);
    let mut rest = value;
    for _ in 0..width {
        let lo = (rest % 10) as u8;
        rest /= 10;
        let hi = (rest % 10) as u8;
        rest /= 10;
        out.push((hi << 4) | lo);
    }

    if rest != 0 {
        return Err(Dlt645Error::ValueOverflow { width });
    }
    Ok(out)
}

/// Encodes each value with [`encode_bcd`] and concatenates them in order.
pub fn encode_bcd_vec(values: &[u64], width: usize) -> Result<Vec<u8>, Dlt645Error> {
    if width == 0 {
        return Err(Dlt645Error::ValueEncode(
            "width must be greater than 0".to_string(),
        ));
    }
    let mut out = Vec::with_capacity(values.len() * width);
    for value in values {
        out.extend(encode_bcd(*value, width)?);
    }
    Ok(out)
}

/// Decodes an address-like hex string and reverses it into wire order.
pub fn encode_hex_le(hex_str: &str) -> Result<Vec<u8>, Dlt645Error> {
    let mut bytes = hex::decode(hex_str.trim())
        .map_err(|e| Dlt645Error::InvalidHexString(format!("{hex_str:?}: {e}")))?;
    bytes.reverse();
    Ok(bytes)
}

/// Inverse of [`encode_hex_le`]: wire-order bytes to an upper-case hex string.
pub fn decode_hex_le(wire: &[u8]) -> String {
    let display: Vec<u8> = wire.iter().rev().copied().collect();
    hex::encode_upper(display)
}

/// A value to be placed in the data domain of a read response or set request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeterValue {
    /// One unsigned integer as `width` BCD bytes.
    Scalar { value: u64, width: usize },
    /// Several integers, each as `width` BCD bytes, in order.
    Vector { values: Vec<u64>, width: usize },
    /// A hex string (address-like), byte-reversed into wire order.
    Hex(String),
    /// Several hex strings, each byte-reversed, concatenated in order.
    HexList(Vec<String>),
    /// Raw bytes, copied as given. Unlike every other variant these are NOT
    /// reversed into wire order.
    Bytes(Vec<u8>),
}

impl MeterValue {
    pub fn scalar(value: u64, width: usize) -> Self {
        MeterValue::Scalar { value, width }
    }

    pub fn vector(values: Vec<u64>, width: usize) -> Self {
        MeterValue::Vector { values, width }
    }

    pub fn encode(&self) -> Result<Vec<u8>, Dlt645Error> {
        match self {
            MeterValue::Scalar { value, width } => encode_bcd(*value, *width),
            MeterValue::Vector { values, width } => encode_bcd_vec(values, *width),
            MeterValue::Hex(s) => encode_hex_le(s),
            MeterValue::HexList(list) => {
                let mut out = Vec::new();
                for s in list {
                    out.extend(encode_hex_le(s)?);
                }
                Ok(out)
            }
            MeterValue::Bytes(bytes) => Ok(bytes.clone()),
        }
    }
}
