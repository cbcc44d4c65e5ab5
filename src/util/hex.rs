//! # Hex Encoding/Decoding Utilities
//!
//! Hex helpers used for log output, CLI input parsing and test frame
//! construction. DL/T 645 traces are usually written as space-separated
//! upper-case byte pairs (`FE FE 68 34 12 ...`), so both the compact and the
//! lenient forms are supported.
//!
//! ## Usage
//!
//! ```rust
//! use dlt645_rs::util::hex::{decode_hex, format_hex_compact, parse_hex_lenient};
//!
//! let data = parse_hex_lenient("68 34 12 00").unwrap();
//! assert_eq!(data, vec![0x68, 0x34, 0x12, 0x00]);
//! assert_eq!(format_hex_compact(&data), "68 34 12 00");
//! assert_eq!(decode_hex("6834").unwrap(), vec![0x68, 0x34]);
//! ```

use crate::error::Dlt645Error;

/// Encode bytes to upper-case hex string
pub fn encode_hex_upper(data: &[u8]) -> String {
    hex::encode_upper(data)
}

/// Decode hex string to bytes
///
/// Accepts both uppercase and lowercase hex characters.
/// Whitespace is automatically stripped.
pub fn decode_hex(hex_str: &str) -> Result<Vec<u8>, Dlt645Error> {
    let cleaned: String = hex_str.chars().filter(|c| !c.is_whitespace()).collect();

    if cleaned.len() % 2 != 0 {
        return Err(Dlt645Error::InvalidHexString(format!(
            "odd number of hex characters: {}",
            cleaned.len()
        )));
    }

    hex::decode(&cleaned).map_err(|e| Dlt645Error::InvalidHexString(e.to_string()))
}

/// Format hex data for compact display (useful for logs)
///
/// Formats data as "68 34 12 00" with spaces between bytes.
pub fn format_hex_compact(data: &[u8]) -> String {
    data.iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse hex string that may contain spaces or other separators
///
/// More lenient than decode_hex, strips all non-hex characters.
pub fn parse_hex_lenient(input: &str) -> Result<Vec<u8>, Dlt645Error> {
    let hex_chars: String = input.chars().filter(|c| c.is_ascii_hexdigit()).collect();

    if hex_chars.is_empty() {
        return Err(Dlt645Error::InvalidHexString("empty hex string".to_string()));
    }

    decode_hex(&hex_chars)
}

/// Helper for creating test data from hex strings
///
/// Panics on invalid hex (intended for test code only).
pub fn hex_to_bytes(hex: &str) -> Vec<u8> {
    parse_hex_lenient(hex).expect("Invalid hex in test data")
}
