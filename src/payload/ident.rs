//! Four-byte DL/T 645 data identifiers (DI3 DI2 DI1 DI0).
//!
//! Identifiers are written in documentation as `DI3 DI2 DI1 DI0`
//! (e.g. `02 01 01 00` for phase-A voltage) but transmitted `DI0` first.
//! [`DataIdent`] keeps the wire order internally; the conventional form is
//! only produced on request.

use std::fmt;

use crate::constants::DLT645_IDENT_LEN;
use crate::error::Dlt645Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DataIdent([u8; DLT645_IDENT_LEN]);

impl DataIdent {
    /// Wraps identifier bytes that are already in wire order (DI0 first).
    pub const fn from_wire(wire: [u8; DLT645_IDENT_LEN]) -> Self {
        Self(wire)
    }

    /// Builds an identifier from the conventional DI3-first byte order.
    pub const fn from_be_bytes(be: [u8; DLT645_IDENT_LEN]) -> Self {
        Self([be[3], be[2], be[1], be[0]])
    }

    /// Builds an identifier from its conventional numeric form, e.g. `0x0201_0100`.
    pub const fn from_u32(value: u32) -> Self {
        Self(value.to_le_bytes())
    }

    /// Reads the first four bytes of a data domain as a wire-order identifier.
    pub fn read_wire(data: &[u8]) -> Option<Self> {
        let bytes: [u8; DLT645_IDENT_LEN] = data.get(..DLT645_IDENT_LEN)?.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Parses the conventional eight-digit hex form (`"02010100"`).
    pub fn parse(s: &str) -> Result<Self, Dlt645Error> {
        let mut be = [0u8; DLT645_IDENT_LEN];
        hex::decode_to_slice(s.trim(), &mut be)
            .map_err(|e| Dlt645Error::InvalidHexString(format!("data identifier {s:?}: {e}")))?;
        Ok(Self::from_be_bytes(be))
    }

    pub fn wire_bytes(&self) -> [u8; DLT645_IDENT_LEN] {
        self.0
    }

    pub fn to_be_bytes(&self) -> [u8; DLT645_IDENT_LEN] {
        let mut be = self.0;
        be.reverse();
        be
    }

    pub fn to_u32(&self) -> u32 {
        u32::from_le_bytes(self.0)
    }
}

/// Formats the conventional form, e.g. `02010100`.
impl fmt::Display for DataIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.to_u32())
    }
}
