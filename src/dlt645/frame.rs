//! # DL/T 645 Frame Codec
//!
//! This module decodes and encodes complete DL/T 645-2007 frames. Structural
//! parsing uses the streaming parsers from `nom`, so a truncated buffer is
//! reported as [`Dlt645Error::Incomplete`] and callers that accumulate bytes
//! from a serial line can simply retry once more bytes arrive.
//!
//! ## Wire layout
//!
//! ```text
//! [wake-up?] 68 A0 A1 A2 A3 A4 A5 68 C L D0..D(L-1) CS 16
//! ```
//!
//! - `A0..A5`: address, least significant byte first
//! - `D0..`: data domain, every byte sent as `(byte + 0x33) mod 256`
//! - `CS`: modulo-256 sum of everything from the first `68` through the
//!   last stuffed data byte
//!
//! ## Usage
//!
//! ```rust
//! use dlt645_rs::dlt645::frame::{decode_frame, encode_frame};
//!
//! let bytes = encode_frame("1234", 0x11, &[0x00, 0x01, 0x01, 0x02], None).unwrap();
//! assert_eq!(
//!     bytes,
//!     [0x68, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00, 0x68, 0x11, 0x04, 0x33, 0x34, 0x34, 0x35, 0xFB, 0x16]
//! );
//!
//! let frame = decode_frame(&bytes).unwrap();
//! assert_eq!(frame.address.to_string(), "000000001234");
//! assert_eq!(frame.control, 0x11);
//! assert_eq!(frame.data, vec![0x00, 0x01, 0x01, 0x02]);
//! ```

use bytes::{BufMut, BytesMut};
use log::{debug, trace};
use nom::{
    bytes::streaming::{tag, take, take_till},
    combinator::verify,
    number::streaming::u8 as byte,
    Err as NomErr, IResult,
};

use crate::constants::{
    DLT645_ADDRESS_LEN, DLT645_END, DLT645_FRAME_OVERHEAD, DLT645_MAX_DATA_LEN, DLT645_START,
    DLT645_STUFFING,
};
use crate::dlt645::address::MeterAddress;
use crate::dlt645::control::ControlWord;
use crate::error::Dlt645Error;
use crate::util::hex::format_hex_compact;

/// A decoded DL/T 645 frame. The data domain is held un-stuffed; the checksum
/// is always derived and never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub address: MeterAddress,
    pub control: u8,
    pub data: Vec<u8>,
}

/// The fields of a frame exactly as they appeared on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame<'a> {
    /// Address bytes in wire order.
    pub address: &'a [u8],
    pub control: u8,
    /// Data domain, still stuffed.
    pub data: &'a [u8],
    pub checksum: u8,
    pub end: u8,
}

impl RawFrame<'_> {
    /// Sum of every byte from the first start character through the stuffed
    /// data domain.
    pub fn calculate_checksum(&self) -> u8 {
        let header = [DLT645_START, DLT645_START, self.control, self.data.len() as u8];
        header
            .iter()
            .chain(self.address)
            .chain(self.data)
            .fold(0u8, |acc, b| acc.wrapping_add(*b))
    }
}

/// Skips leading noise (wake-up bytes) up to and including the first start
/// character.
fn sync(input: &[u8]) -> IResult<&[u8], &[u8]> {
    let (input, _noise) = take_till(|b| b == DLT645_START)(input)?;
    tag(&[DLT645_START][..])(input)
}

/// Parses the frame structure without judging the checksum or end marker.
pub fn parse_raw_frame(input: &[u8]) -> IResult<&[u8], RawFrame<'_>> {
    let (input, _) = sync(input)?;
    let (input, address) = take(DLT645_ADDRESS_LEN)(input)?;
    let (input, _) = verify(byte, |b: &u8| *b == DLT645_START)(input)?;
    let (input, control) = byte(input)?;
    let (input, len) = byte(input)?;
    let (input, data) = take(len as usize)(input)?;
    let (input, checksum) = byte(input)?;
    let (input, end) = byte(input)?;

    Ok((
        input,
        RawFrame {
            address,
            control,
            data,
            checksum,
            end,
        },
    ))
}

fn map_parse_error(err: NomErr<nom::error::Error<&[u8]>>) -> Dlt645Error {
    match err {
        NomErr::Incomplete(_) => Dlt645Error::Incomplete,
        NomErr::Error(e) | NomErr::Failure(e) => {
            Dlt645Error::FrameFormat(format!("expected second start character 68H ({:?})", e.code))
        }
    }
}

/// Decodes one frame, returning the bytes that follow it.
///
/// Decoding is all-or-nothing: the checksum is checked over the stuffed wire
/// bytes, then the end marker, and only then is the data domain un-stuffed.
pub fn decode_frame_partial(input: &[u8]) -> Result<(&[u8], Frame), Dlt645Error> {
    let (rest, raw) = parse_raw_frame(input).map_err(map_parse_error)?;

    let calculated = raw.calculate_checksum();
    if raw.checksum != calculated {
        debug!(
            "Rejecting DL/T 645 frame: checksum {:#04X} != {:#04X}",
            raw.checksum, calculated
        );
        return Err(Dlt645Error::ChecksumMismatch {
            expected: raw.checksum,
            calculated,
        });
    }
    if raw.end != DLT645_END {
        debug!("Rejecting DL/T 645 frame: end character {:#04X}", raw.end);
        return Err(Dlt645Error::FrameFormat(format!(
            "end character {:#04X} != 16H",
            raw.end
        )));
    }

    let frame = Frame {
        address: MeterAddress::from_wire(raw.address)?,
        control: raw.control,
        data: unstuff(raw.data),
    };
    trace!(
        "Decoded frame addr={} ctrl={:#04X} data=[{}]",
        frame.address,
        frame.control,
        format_hex_compact(&frame.data)
    );
    Ok((rest, frame))
}

/// Decodes one frame from the start of `input`, tolerating leading noise.
pub fn decode_frame(input: &[u8]) -> Result<Frame, Dlt645Error> {
    decode_frame_partial(input).map(|(_, frame)| frame)
}

/// Encodes a frame from a textual address (1–12 hex digits).
///
/// The wake-up prefix, if any, is prepended as-is and is not covered by the
/// checksum.
pub fn encode_frame(
    address: &str,
    control: u8,
    data: &[u8],
    prefix: Option<&[u8]>,
) -> Result<Vec<u8>, Dlt645Error> {
    let address = MeterAddress::parse(address)?;
    Frame::new(address, control, data.to_vec()).encode(prefix.unwrap_or_default())
}

/// Adds the stuffing constant to every byte.
pub fn stuff(data: &[u8]) -> Vec<u8> {
    data.iter().map(|b| b.wrapping_add(DLT645_STUFFING)).collect()
}

/// Subtracts the stuffing constant from every byte.
pub fn unstuff(data: &[u8]) -> Vec<u8> {
    data.iter().map(|b| b.wrapping_sub(DLT645_STUFFING)).collect()
}

impl Frame {
    pub fn new(address: MeterAddress, control: u8, data: Vec<u8>) -> Self {
        Self {
            address,
            control,
            data,
        }
    }

    pub fn control_word(&self) -> ControlWord {
        ControlWord(self.control)
    }

    /// Checksum this frame carries on the wire.
    pub fn checksum(&self) -> u8 {
        let wire = self.address.to_wire();
        let stuffed = stuff(&self.data);
        RawFrame {
            address: &wire,
            control: self.control,
            data: &stuffed,
            checksum: 0,
            end: DLT645_END,
        }
        .calculate_checksum()
    }

    /// Appends the encoded frame to `buf`, preceded by `prefix`.
    pub fn encode_into(&self, buf: &mut BytesMut, prefix: &[u8]) -> Result<(), Dlt645Error> {
        if self.data.len() > DLT645_MAX_DATA_LEN {
            return Err(Dlt645Error::FrameTooLarge(self.data.len()));
        }

        buf.reserve(prefix.len() + DLT645_FRAME_OVERHEAD + self.data.len());
        buf.put_slice(prefix);

        let start = buf.len();
        buf.put_u8(DLT645_START);
        buf.put_slice(&self.address.to_wire());
        buf.put_u8(DLT645_START);
        buf.put_u8(self.control);
        buf.put_u8(self.data.len() as u8);
        for b in &self.data {
            buf.put_u8(b.wrapping_add(DLT645_STUFFING));
        }

        let checksum = buf[start..].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        buf.put_u8(checksum);
        buf.put_u8(DLT645_END);
        Ok(())
    }

    /// Encodes the frame, preceded by `prefix` (pass `&[]` for none).
    pub fn encode(&self, prefix: &[u8]) -> Result<Vec<u8>, Dlt645Error> {
        let mut buf = BytesMut::with_capacity(prefix.len() + DLT645_FRAME_OVERHEAD + self.data.len());
        self.encode_into(&mut buf, prefix)?;
        Ok(buf.to_vec())
    }
}
