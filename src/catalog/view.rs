//! Read-only views over decoded data domains.
//!
//! Views are produced only by the station and response interpreters; they have
//! no public constructors and no setters. Views that expose parts of the data
//! domain borrow it, so they cannot outlive the frame they came from.

use std::sync::Arc;

use bitflags::bitflags;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::dlt645::address::MeterAddress;
use crate::payload::data_encoding::ValueCodec;
use crate::payload::ident::DataIdent;

/// Minute, hour, day, month and two-digit year, as carried on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeterTimestamp {
    pub minute: u8,
    pub hour: u8,
    pub day: u8,
    pub month: u8,
    /// Years since 2000.
    pub year: u8,
}

impl MeterTimestamp {
    pub fn from_naive(time: &NaiveDateTime) -> Self {
        Self {
            minute: time.minute() as u8,
            hour: time.hour() as u8,
            day: time.day() as u8,
            month: time.month() as u8,
            year: time.year().rem_euclid(100) as u8,
        }
    }

    /// Calendar time, or `None` if the fields do not form a valid date.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2000 + i32::from(self.year), self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.minute.into(), 0)
    }

    pub(crate) fn from_wire(b: &[u8]) -> Self {
        Self {
            minute: b[0],
            hour: b[1],
            day: b[2],
            month: b[3],
            year: b[4],
        }
    }

    pub(crate) fn to_wire(self) -> [u8; 5] {
        [self.minute, self.hour, self.day, self.month, self.year]
    }
}

bitflags! {
    /// Error word returned by a meter in an exception response.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ErrorWord: u8 {
        const OTHER = 0b0000_0001;
        /// Requested data not available
        const NO_DATA = 0b0000_0010;
        /// Password wrong or not authorised
        const UNAUTHORIZED = 0b0000_0100;
        const BAUD_RATE_UNCHANGEABLE = 0b0000_1000;
        const YEAR_ZONE_EXCEEDED = 0b0001_0000;
        const DAY_PERIOD_EXCEEDED = 0b0010_0000;
        const TARIFF_EXCEEDED = 0b0100_0000;
    }
}

// ----------------------------------------------------------------------------
// Station (master-issued) views
// ----------------------------------------------------------------------------

/// Read data request (0x11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadRequest {
    ident: DataIdent,
    block: Option<u8>,
    timestamp: Option<MeterTimestamp>,
}

impl ReadRequest {
    pub(crate) fn new(
        ident: DataIdent,
        block: Option<u8>,
        timestamp: Option<MeterTimestamp>,
    ) -> Self {
        Self {
            ident,
            block,
            timestamp,
        }
    }

    pub fn ident(&self) -> DataIdent {
        self.ident
    }

    /// Number of load-profile blocks requested.
    pub fn block(&self) -> Option<u8> {
        self.block
    }

    /// Start time of a load-profile read.
    pub fn timestamp(&self) -> Option<MeterTimestamp> {
        self.timestamp
    }
}

/// Read subsequent data request (0x12).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadContinuationRequest {
    ident: DataIdent,
    sequence: u8,
}

impl ReadContinuationRequest {
    pub(crate) fn new(ident: DataIdent, sequence: u8) -> Self {
        Self { ident, sequence }
    }

    pub fn ident(&self) -> DataIdent {
        self.ident
    }

    pub fn sequence(&self) -> u8 {
        self.sequence
    }
}

/// Write data request (0x14).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetRequest<'a> {
    ident: DataIdent,
    password: &'a [u8],
    operator: &'a [u8],
    value: &'a [u8],
}

impl<'a> SetRequest<'a> {
    pub(crate) fn new(
        ident: DataIdent,
        password: &'a [u8],
        operator: &'a [u8],
        value: &'a [u8],
    ) -> Self {
        Self {
            ident,
            password,
            operator,
            value,
        }
    }

    pub fn ident(&self) -> DataIdent {
        self.ident
    }

    pub fn password(&self) -> &'a [u8] {
        self.password
    }

    pub fn operator(&self) -> &'a [u8] {
        self.operator
    }

    /// Value bytes as transmitted (after un-stuffing).
    pub fn value(&self) -> &'a [u8] {
        self.value
    }
}

/// Broadcast time calibration (0x08).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeCalibration {
    second: u8,
    timestamp: MeterTimestamp,
}

impl TimeCalibration {
    pub(crate) fn from_wire(b: &[u8]) -> Self {
        Self {
            second: b[0],
            timestamp: MeterTimestamp::from_wire(&b[1..6]),
        }
    }

    pub fn second(&self) -> u8 {
        self.second
    }

    pub fn minute(&self) -> u8 {
        self.timestamp.minute
    }

    pub fn hour(&self) -> u8 {
        self.timestamp.hour
    }

    pub fn day(&self) -> u8 {
        self.timestamp.day
    }

    pub fn month(&self) -> u8 {
        self.timestamp.month
    }

    pub fn year(&self) -> u8 {
        self.timestamp.year
    }

    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .to_naive()?
            .with_second(self.second.into())
    }
}

/// Freeze command (0x16). A field of 99 means "every" in the standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezeCommand {
    minute: u8,
    hour: u8,
    day: u8,
    month: u8,
}

impl FreezeCommand {
    pub(crate) fn from_wire(b: &[u8]) -> Self {
        Self {
            minute: b[0],
            hour: b[1],
            day: b[2],
            month: b[3],
        }
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }
}

// ----------------------------------------------------------------------------
// Response (meter-issued) views
// ----------------------------------------------------------------------------

/// Normal read response whose identifier has a registered codec.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadResponse {
    control: u8,
    ident: DataIdent,
    values: Vec<f64>,
    codec: Arc<ValueCodec>,
    has_more: bool,
    sequence: Option<u8>,
}

impl ReadResponse {
    pub(crate) fn new(
        control: u8,
        ident: DataIdent,
        values: Vec<f64>,
        codec: Arc<ValueCodec>,
        has_more: bool,
        sequence: Option<u8>,
    ) -> Self {
        Self {
            control,
            ident,
            values,
            codec,
            has_more,
            sequence,
        }
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn ident(&self) -> DataIdent {
        self.ident
    }

    /// Scaled values, one per codec-width chunk. Empty when the meter sent
    /// the identifier alone.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First value, for single-value identifiers.
    pub fn value(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn unit(&self) -> &str {
        self.codec.unit()
    }

    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// The meter has further frames for this identifier.
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Frame sequence number; `None` for the first (0x91/0xB1) frame.
    pub fn sequence(&self) -> Option<u8> {
        self.sequence
    }

    pub fn is_continuation(&self) -> bool {
        self.sequence.is_some()
    }
}

/// Normal read response for an identifier with no registered codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnregisteredResponse<'a> {
    control: u8,
    ident: DataIdent,
    payload: &'a [u8],
    has_more: bool,
    sequence: Option<u8>,
}

impl<'a> UnregisteredResponse<'a> {
    pub(crate) fn new(
        control: u8,
        ident: DataIdent,
        payload: &'a [u8],
        has_more: bool,
        sequence: Option<u8>,
    ) -> Self {
        Self {
            control,
            ident,
            payload,
            has_more,
            sequence,
        }
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn ident(&self) -> DataIdent {
        self.ident
    }

    /// Value bytes following the identifier, without the sequence byte.
    pub fn payload(&self) -> &'a [u8] {
        self.payload
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn sequence(&self) -> Option<u8> {
        self.sequence
    }

    /// Decodes the payload with a codec chosen by the caller.
    pub fn decode_with(&self, codec: &ValueCodec) -> Result<Vec<f64>, crate::Dlt645Error> {
        codec.decode(self.payload)
    }
}

/// Exception response carrying one error byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorResponse {
    control: u8,
    code: u8,
}

impl ErrorResponse {
    pub(crate) fn new(control: u8, code: u8) -> Self {
        Self { control, code }
    }

    pub fn control(&self) -> u8 {
        self.control
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn error_word(&self) -> ErrorWord {
        ErrorWord::from_bits_retain(self.code)
    }
}

/// Set or freeze acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Acknowledgement {
    success: bool,
    code: u8,
}

impl Acknowledgement {
    pub(crate) fn new(success: bool, code: u8) -> Self {
        Self { success, code }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Status byte; zero for a success acknowledgement without data.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Error flags of a failed acknowledgement; empty on success.
    pub fn error_word(&self) -> ErrorWord {
        if self.success {
            ErrorWord::empty()
        } else {
            ErrorWord::from_bits_retain(self.code)
        }
    }
}

/// Set-address request (0x15): the new address to adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetAddressRequest {
    address: MeterAddress,
}

impl SetAddressRequest {
    pub(crate) fn new(address: MeterAddress) -> Self {
        Self { address }
    }

    pub fn address(&self) -> MeterAddress {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_naive_round_trip() {
        let time = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        let ts = MeterTimestamp::from_naive(&time);
        assert_eq!(ts.to_wire(), [45, 13, 15, 3, 24]);
        assert_eq!(ts.to_naive(), Some(time));
    }

    #[test]
    fn test_timestamp_invalid_date() {
        let ts = MeterTimestamp::from_wire(&[0, 0, 31, 2, 24]);
        assert_eq!(ts.to_naive(), None);
    }

    #[test]
    fn test_error_word_flags() {
        let resp = ErrorResponse::new(0xD1, 0x06);
        assert_eq!(resp.error_word(), ErrorWord::NO_DATA | ErrorWord::UNAUTHORIZED);

        let ack = Acknowledgement::new(false, 0x01);
        assert!(ack.error_word().contains(ErrorWord::OTHER));
        assert!(Acknowledgement::new(true, 0x00).error_word().is_empty());
    }
}
