//! # Utility Modules
//!
//! Common helpers used throughout the dlt645-rs crate.

pub mod hex;

pub use hex::{decode_hex, encode_hex_upper, format_hex_compact, hex_to_bytes, parse_hex_lenient};
