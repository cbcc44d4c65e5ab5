//! # DL/T 645 Error Handling
//!
//! This module defines the Dlt645Error enum, which represents the different error
//! types that can occur in the dlt645-rs crate.

use thiserror::Error;

/// Represents the different error types that can occur in the DL/T 645 crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Dlt645Error {
    /// Missing or misplaced start character, or a wrong end character.
    #[error("Frame format error: {0}")]
    FrameFormat(String),

    /// The input ended before a complete frame was read.
    #[error("Incomplete frame")]
    Incomplete,

    /// Indicates a checksum mismatch.
    #[error("Invalid checksum: expected {expected:#04X}, calculated {calculated:#04X}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// Address is empty, too long, or not hexadecimal.
    #[error("Invalid address: {0}")]
    AddressFormat(String),

    /// The control code has no decoder in this direction.
    #[error("Unsupported function code: {0:#04X}")]
    FunctionCodeUnrecognized(u8),

    /// The data domain is shorter than the control code's layout requires.
    #[error("Data domain too short for control {control:#04X}: need {required} bytes, got {actual}")]
    DataDomainTooShort {
        control: u8,
        required: usize,
        actual: usize,
    },

    /// Value bytes are not a whole number of codec-width chunks.
    #[error("Value length {len} is not a multiple of width {width}")]
    ValueLengthMismatch { len: usize, width: usize },

    /// A BCD nibble held a value above 9.
    #[error("Invalid BCD digit in byte 0x{0:02X}")]
    InvalidBcdDigit(u8),

    /// The value does not fit in the requested number of BCD bytes.
    #[error("Value does not fit in {width} BCD bytes")]
    ValueOverflow { width: usize },

    /// A value could not be encoded (zero width, unsupported shape).
    #[error("Value encode error: {0}")]
    ValueEncode(String),

    /// A value codec configuration was rejected (zero width or ratio).
    #[error("Invalid value codec configuration: {0}")]
    InvalidCodecConfig(String),

    /// Indicates an invalid hexadecimal string was provided.
    #[error("Invalid hexadecimal string: {0}")]
    InvalidHexString(String),

    /// The data domain exceeds what the length byte can carry.
    #[error("Data domain too large: {0} bytes")]
    FrameTooLarge(usize),

    /// An identifier registry document could not be loaded.
    #[error("Registry configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Dlt645Error {
    fn from(err: serde_json::Error) -> Self {
        Dlt645Error::Config(err.to_string())
    }
}

impl From<std::io::Error> for Dlt645Error {
    fn from(err: std::io::Error) -> Self {
        Dlt645Error::Config(err.to_string())
    }
}
