//! # Station Interpreter
//!
//! Decodes frames issued by the master station, for use on the meter side.
//! Each call maps one `(control, data)` pair to exactly one outcome; a
//! rejected frame never affects the next call.
//!
//! ```rust
//! use dlt645_rs::catalog::{StationInterpreter, StationRequest};
//! use dlt645_rs::dlt645::frame::decode_frame;
//! use dlt645_rs::payload::DataIdent;
//!
//! let bytes = [0x68, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00, 0x68, 0x11, 0x04,
//!              0x33, 0x34, 0x34, 0x35, 0xFB, 0x16];
//! let frame = decode_frame(&bytes).unwrap();
//! match StationInterpreter::new().interpret(frame.control, &frame.data) {
//!     Ok(StationRequest::Read(req)) => assert_eq!(req.ident(), DataIdent::from_u32(0x0201_0100)),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use log::warn;

use crate::catalog::view::{
    FreezeCommand, MeterTimestamp, ReadContinuationRequest, ReadRequest, SetAddressRequest,
    SetRequest, TimeCalibration,
};
use crate::catalog::{require, Rejection};
use crate::constants::*;
use crate::dlt645::address::MeterAddress;
use crate::dlt645::frame::Frame;
use crate::error::Dlt645Error;
use crate::payload::ident::DataIdent;
use crate::util::hex::format_hex_compact;

/// A decoded master-station request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRequest<'a> {
    Read(ReadRequest),
    ReadContinuation(ReadContinuationRequest),
    Set(SetRequest<'a>),
    ReadAddress,
    SetAddress(SetAddressRequest),
    TimeCalibration(TimeCalibration),
    Freeze(FreezeCommand),
}

/// Stateless demultiplexer for master-issued frames.
#[derive(Debug, Default, Clone, Copy)]
pub struct StationInterpreter;

impl StationInterpreter {
    pub fn new() -> Self {
        StationInterpreter
    }

    /// Interprets one decoded frame.
    pub fn interpret_frame<'a>(&self, frame: &'a Frame) -> Result<StationRequest<'a>, Rejection> {
        self.interpret(frame.control, &frame.data)
    }

    /// Interprets one control code and its un-stuffed data domain.
    pub fn interpret<'a>(
        &self,
        control: u8,
        data: &'a [u8],
    ) -> Result<StationRequest<'a>, Rejection> {
        dispatch(control, data).map_err(|error| {
            warn!(
                "Rejected station frame ctrl={control:#04X} data=[{}]: {error}",
                format_hex_compact(data)
            );
            Rejection::new(control, data, error)
        })
    }
}

fn dispatch(control: u8, data: &[u8]) -> Result<StationRequest<'_>, Dlt645Error> {
    match control {
        CTRL_READ_REQUEST => parse_read_request(data).map(StationRequest::Read),
        CTRL_READ_NEXT_REQUEST => {
            require(control, data, DLT645_IDENT_LEN + 1)?;
            Ok(StationRequest::ReadContinuation(ReadContinuationRequest::new(
                wire_ident(data),
                data[DLT645_IDENT_LEN],
            )))
        }
        CTRL_SET_REQUEST => {
            require(control, data, 3 * DLT645_IDENT_LEN)?;
            Ok(StationRequest::Set(SetRequest::new(
                wire_ident(data),
                &data[4..8],
                &data[8..12],
                &data[12..],
            )))
        }
        CTRL_READ_ADDRESS_REQUEST => Ok(StationRequest::ReadAddress),
        CTRL_SET_ADDRESS_REQUEST => {
            require(control, data, DLT645_ADDRESS_LEN)?;
            let address = MeterAddress::from_wire(&data[..DLT645_ADDRESS_LEN])?;
            Ok(StationRequest::SetAddress(SetAddressRequest::new(address)))
        }
        CTRL_TIME_CALIBRATION => {
            require(control, data, 6)?;
            Ok(StationRequest::TimeCalibration(TimeCalibration::from_wire(data)))
        }
        CTRL_FREEZE_REQUEST => {
            require(control, data, 4)?;
            Ok(StationRequest::Freeze(FreezeCommand::from_wire(data)))
        }
        other => Err(Dlt645Error::FunctionCodeUnrecognized(other)),
    }
}

/// `ident(4) [+ block(1) [+ mm hh DD MM YY]]`
fn parse_read_request(data: &[u8]) -> Result<ReadRequest, Dlt645Error> {
    require(CTRL_READ_REQUEST, data, DLT645_IDENT_LEN)?;
    let block = data.get(DLT645_IDENT_LEN).copied();
    let timestamp = data
        .get(DLT645_IDENT_LEN + 1..DLT645_IDENT_LEN + 6)
        .map(MeterTimestamp::from_wire);
    Ok(ReadRequest::new(wire_ident(data), block, timestamp))
}

/// Caller has already checked the length.
fn wire_ident(data: &[u8]) -> DataIdent {
    DataIdent::from_wire([data[0], data[1], data[2], data[3]])
}
