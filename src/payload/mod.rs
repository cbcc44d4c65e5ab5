//! The payload module contains the components responsible for the contents of
//! the data domain: data identifiers, the BCD value codec, and the identifier
//! registry that binds the two.

pub mod data_encoding;
pub mod ident;
pub mod registry;

pub use data_encoding::{
    decode_bcd_values, encode_bcd, encode_bcd_vec, encode_hex_le, ByteOrder, MeterValue,
    ValueCodec,
};
pub use ident::DataIdent;
pub use registry::{describe_ident, CodecEntry, IdentRegistry, KnownIdent, KNOWN_IDENTS};
