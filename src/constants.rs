//! DL/T 645-2007 Protocol Constants
//!
//! This module defines the fixed bytes and control codes used by the
//! DL/T 645-2007 frame format.

/// Frame start character, sent twice (before and after the address field)
pub const DLT645_START: u8 = 0x68;

/// Frame end character
pub const DLT645_END: u8 = 0x16;

/// Added to every data-domain byte on transmit, subtracted on receipt
pub const DLT645_STUFFING: u8 = 0x33;

/// Number of bytes in the address field
pub const DLT645_ADDRESS_LEN: usize = 6;

/// Number of bytes in a data identifier (DI3..DI0)
pub const DLT645_IDENT_LEN: usize = 4;

/// Largest data domain the one-byte length field can describe
pub const DLT645_MAX_DATA_LEN: usize = 255;

/// Envelope bytes around the data domain: 68 + addr(6) + 68 + C + L + CS + 16
pub const DLT645_FRAME_OVERHEAD: usize = 12;

/// Broadcast address, used by time calibration and freeze commands
pub const DLT645_BROADCAST_ADDRESS: &str = "999999999999";

/// Address-discovery placeholder (six 0xAA bytes)
pub const DLT645_DISCOVERY_ADDRESS: &str = "AAAAAAAAAAAA";

/// Common wake-up preamble sent ahead of a frame
pub const DLT645_WAKE_UP: [u8; 4] = [0xFE, 0xFE, 0xFE, 0xFE];

// ----------------------------------------------------------------------------
// Control codes (master requests)
// ----------------------------------------------------------------------------

/// Read data
pub const CTRL_READ_REQUEST: u8 = 0x11;
/// Read subsequent data
pub const CTRL_READ_NEXT_REQUEST: u8 = 0x12;
/// Read communication address
pub const CTRL_READ_ADDRESS_REQUEST: u8 = 0x13;
/// Write data (set)
pub const CTRL_SET_REQUEST: u8 = 0x14;
/// Write communication address
pub const CTRL_SET_ADDRESS_REQUEST: u8 = 0x15;
/// Freeze command
pub const CTRL_FREEZE_REQUEST: u8 = 0x16;
/// Broadcast time calibration
pub const CTRL_TIME_CALIBRATION: u8 = 0x08;

// ----------------------------------------------------------------------------
// Control codes (meter responses)
// ----------------------------------------------------------------------------

/// Read data, normal response, no following frame
pub const CTRL_READ_RESPONSE: u8 = 0x91;
/// Read data, normal response, following frame present
pub const CTRL_READ_RESPONSE_MORE: u8 = 0xB1;
/// Read data, exception response
pub const CTRL_READ_ERROR: u8 = 0xD1;
/// Read subsequent data, normal response, no following frame
pub const CTRL_READ_NEXT_RESPONSE: u8 = 0x92;
/// Read subsequent data, normal response, following frame present
pub const CTRL_READ_NEXT_RESPONSE_MORE: u8 = 0xB2;
/// Read subsequent data, exception response
pub const CTRL_READ_NEXT_ERROR: u8 = 0xD2;
/// Read address response
pub const CTRL_READ_ADDRESS_RESPONSE: u8 = 0x93;
/// Write data, normal response
pub const CTRL_SET_RESPONSE: u8 = 0x94;
/// Write data, exception response
pub const CTRL_SET_ERROR: u8 = 0xD4;
/// Write address response
pub const CTRL_SET_ADDRESS_RESPONSE: u8 = 0x95;
/// Freeze command, normal response
pub const CTRL_FREEZE_RESPONSE: u8 = 0x96;
/// Freeze command, exception response
pub const CTRL_FREEZE_ERROR: u8 = 0xD6;

// Control word bits
pub const CTRL_MASK_FUNCTION: u8 = 0x1F;
pub const CTRL_MASK_FOLLOWING: u8 = 0x20;
pub const CTRL_MASK_EXCEPTION: u8 = 0x40;
pub const CTRL_MASK_DIR_S2M: u8 = 0x80;
