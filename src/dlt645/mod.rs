//! The dlt645 module contains the frame transport: address handling, the
//! control byte, and frame decoding and encoding.

pub mod address;
pub mod control;
pub mod frame;

pub use address::MeterAddress;
pub use control::{ControlWord, Direction};
pub use frame::{decode_frame, decode_frame_partial, encode_frame, parse_raw_frame, Frame, RawFrame};
