//! # dlt645-rs - A Rust Crate for DL/T 645-2007 Meter-Bus Communication
//!
//! The dlt645-rs crate implements the wire protocol of DL/T 645-2007, the
//! meter-reading bus used by electricity meters, where a master station
//! exchanges framed, checksummed and byte-stuffed messages with slave meters.
//!
//! ## Features
//!
//! - Decode and encode complete frames, including wake-up prefixes and leading noise
//! - Encode and decode BCD meter values with configurable width, byte order, ratio and offset
//! - Build the frame for every control code, in both directions
//! - Interpret master-issued frames on the meter side and meter responses on the station side
//! - Attach value decoding to data identifiers through a shared registry, in code or from JSON
//! - Support for logging and error handling
//!
//! Transport I/O is left to the caller: the crate works on byte slices and
//! never blocks.
//!
//! ## Usage
//!
//! ```toml
//! [dependencies]
//! dlt645-rs = "0.1.0"
//! ```
//!
//! ```rust
//! use dlt645_rs::{
//!     build_read_response, decode_frame, DataIdent, MeterAddress, MeterResponse, MeterValue,
//!     ResponseInterpreter, ValueCodec,
//! };
//!
//! let interpreter = ResponseInterpreter::default();
//! interpreter.register([0x02, 0x01, 0x01, 0x00], ValueCodec::scaled(2, 0.1, "V").unwrap());
//!
//! let addr = MeterAddress::parse("1234").unwrap();
//! let value = MeterValue::scalar(2219, 2);
//! let bytes =
//!     build_read_response(&addr, DataIdent::from_u32(0x0201_0100), Some(&value), false, &[]).unwrap();
//!
//! let frame = decode_frame(&bytes).unwrap();
//! if let Ok(MeterResponse::Read(resp)) = interpreter.interpret_frame(&frame) {
//!     assert!((resp.value().unwrap() - 221.9).abs() < 1e-9);
//! }
//! ```

pub mod catalog;
pub mod constants;
pub mod dlt645;
pub mod error;
pub mod logging;
pub mod payload;
pub mod util;

pub use crate::error::Dlt645Error;
pub use crate::logging::{init_logger, log_info};

// Frame transport
pub use dlt645::{decode_frame, decode_frame_partial, encode_frame, ControlWord, Direction, Frame, MeterAddress};

// Values and identifiers
pub use payload::{ByteOrder, DataIdent, IdentRegistry, MeterValue, ValueCodec};

// Message catalog
pub use catalog::{
    build_freeze_error_response, build_freeze_request, build_freeze_response,
    build_read_address_request, build_read_address_response, build_read_continuation_error_response,
    build_read_continuation_request, build_read_continuation_response, build_read_error_response,
    build_read_request, build_read_response, build_set_address_request, build_set_address_response,
    build_set_error_response, build_set_request, build_set_response, build_time_calibration,
    ErrorWord, LoadProfile, MeterResponse, MeterTimestamp, Rejection, ResponseInterpreter,
    StationInterpreter, StationRequest,
};
