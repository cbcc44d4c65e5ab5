//! # Frame Builders
//!
//! One builder per control code. Each lays out the data domain, wraps it in a
//! frame for the given address and returns the encoded bytes, preceded by
//! `prefix` (the wake-up bytes, or `&[]`).
//!
//! Identifiers are written in wire order. Every argument is validated before
//! any output is produced, so a failing builder never returns a partial frame.
//!
//! ```rust
//! use dlt645_rs::catalog::build_read_request;
//! use dlt645_rs::dlt645::MeterAddress;
//! use dlt645_rs::payload::DataIdent;
//!
//! let addr = MeterAddress::parse("1234").unwrap();
//! let bytes = build_read_request(&addr, DataIdent::from_u32(0x0201_0100), None, &[]).unwrap();
//! assert_eq!(bytes[10..14], [0x33, 0x34, 0x34, 0x35]);
//! ```

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::catalog::view::{ErrorWord, MeterTimestamp};
use crate::constants::*;
use crate::dlt645::address::MeterAddress;
use crate::dlt645::frame::Frame;
use crate::error::Dlt645Error;
use crate::payload::data_encoding::MeterValue;
use crate::payload::ident::DataIdent;

/// Load-profile selector of a read request: a block count, optionally with the
/// time to read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProfile {
    pub blocks: u8,
    pub since: Option<MeterTimestamp>,
}

impl LoadProfile {
    pub fn blocks(blocks: u8) -> Self {
        Self {
            blocks,
            since: None,
        }
    }

    pub fn since(blocks: u8, time: &NaiveDateTime) -> Self {
        Self {
            blocks,
            since: Some(MeterTimestamp::from_naive(time)),
        }
    }
}

fn build(
    address: &MeterAddress,
    control: u8,
    data: Vec<u8>,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    Frame::new(*address, control, data).encode(prefix)
}

fn ident_with_value(
    ident: DataIdent,
    value: Option<&MeterValue>,
) -> Result<Vec<u8>, Dlt645Error> {
    let mut data = ident.wire_bytes().to_vec();
    if let Some(value) = value {
        data.extend(value.encode()?);
    }
    Ok(data)
}

/// Read data (0x11).
pub fn build_read_request(
    address: &MeterAddress,
    ident: DataIdent,
    load_profile: Option<LoadProfile>,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let mut data = ident.wire_bytes().to_vec();
    if let Some(profile) = load_profile {
        data.push(profile.blocks);
        if let Some(since) = profile.since {
            data.extend_from_slice(&since.to_wire());
        }
    }
    build(address, CTRL_READ_REQUEST, data, prefix)
}

/// Read data response (0x91, or 0xB1 when `has_more`). With no value the
/// identifier is sent alone.
pub fn build_read_response(
    address: &MeterAddress,
    ident: DataIdent,
    value: Option<&MeterValue>,
    has_more: bool,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let control = if has_more {
        CTRL_READ_RESPONSE_MORE
    } else {
        CTRL_READ_RESPONSE
    };
    build(address, control, ident_with_value(ident, value)?, prefix)
}

/// Read data exception response (0xD1).
pub fn build_read_error_response(
    address: &MeterAddress,
    error: ErrorWord,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_READ_ERROR, vec![error.bits()], prefix)
}

/// Read subsequent data (0x12).
pub fn build_read_continuation_request(
    address: &MeterAddress,
    ident: DataIdent,
    sequence: u8,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let mut data = ident.wire_bytes().to_vec();
    data.push(sequence);
    build(address, CTRL_READ_NEXT_REQUEST, data, prefix)
}

/// Read subsequent data response (0x92, or 0xB2 when `has_more`). The
/// sequence byte always closes the data domain.
pub fn build_read_continuation_response(
    address: &MeterAddress,
    ident: DataIdent,
    value: Option<&MeterValue>,
    sequence: u8,
    has_more: bool,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let control = if has_more {
        CTRL_READ_NEXT_RESPONSE_MORE
    } else {
        CTRL_READ_NEXT_RESPONSE
    };
    let mut data = ident_with_value(ident, value)?;
    data.push(sequence);
    build(address, control, data, prefix)
}

/// Read subsequent data exception response (0xD2).
pub fn build_read_continuation_error_response(
    address: &MeterAddress,
    error: ErrorWord,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_READ_NEXT_ERROR, vec![error.bits()], prefix)
}

/// Write data (0x14): `ident + password + operator + value`.
pub fn build_set_request(
    address: &MeterAddress,
    ident: DataIdent,
    password: [u8; 4],
    operator: [u8; 4],
    value: &MeterValue,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let value = value.encode()?;
    let mut data = Vec::with_capacity(3 * DLT645_IDENT_LEN + value.len());
    data.extend_from_slice(&ident.wire_bytes());
    data.extend_from_slice(&password);
    data.extend_from_slice(&operator);
    data.extend(value);
    build(address, CTRL_SET_REQUEST, data, prefix)
}

pub fn build_set_response(address: &MeterAddress, prefix: &[u8]) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_SET_RESPONSE, vec![0x00], prefix)
}

pub fn build_set_error_response(
    address: &MeterAddress,
    error: ErrorWord,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_SET_ERROR, vec![error.bits()], prefix)
}

/// Read communication address (0x13), sent to the discovery address.
pub fn build_read_address_request(prefix: &[u8]) -> Result<Vec<u8>, Dlt645Error> {
    build(&MeterAddress::DISCOVERY, CTRL_READ_ADDRESS_REQUEST, Vec::new(), prefix)
}

pub fn build_read_address_response(
    address: &MeterAddress,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(
        address,
        CTRL_READ_ADDRESS_RESPONSE,
        address.to_wire().to_vec(),
        prefix,
    )
}

/// Write communication address (0x15), sent to the discovery address with
/// the new address as data.
pub fn build_set_address_request(
    new_address: &MeterAddress,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(
        &MeterAddress::DISCOVERY,
        CTRL_SET_ADDRESS_REQUEST,
        new_address.to_wire().to_vec(),
        prefix,
    )
}

pub fn build_set_address_response(
    address: &MeterAddress,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(
        &MeterAddress::DISCOVERY,
        CTRL_SET_ADDRESS_RESPONSE,
        address.to_wire().to_vec(),
        prefix,
    )
}

/// Broadcast time calibration (0x08): `ss mm hh DD MM YY`.
pub fn build_time_calibration(
    time: &NaiveDateTime,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let mut data = Vec::with_capacity(6);
    data.push(time.second() as u8);
    data.extend_from_slice(&MeterTimestamp::from_naive(time).to_wire());
    build(&MeterAddress::BROADCAST, CTRL_TIME_CALIBRATION, data, prefix)
}

/// Freeze command (0x16): `mm hh DD MM`. `None` freezes every meter on the
/// bus through the broadcast address.
pub fn build_freeze_request(
    address: Option<&MeterAddress>,
    at: &NaiveDateTime,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    let data = vec![
        at.minute() as u8,
        at.hour() as u8,
        at.day() as u8,
        at.month() as u8,
    ];
    let address = address.unwrap_or(&MeterAddress::BROADCAST);
    build(address, CTRL_FREEZE_REQUEST, data, prefix)
}

pub fn build_freeze_response(
    address: &MeterAddress,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_FREEZE_RESPONSE, Vec::new(), prefix)
}

pub fn build_freeze_error_response(
    address: &MeterAddress,
    error: ErrorWord,
    prefix: &[u8],
) -> Result<Vec<u8>, Dlt645Error> {
    build(address, CTRL_FREEZE_ERROR, vec![error.bits()], prefix)
}
