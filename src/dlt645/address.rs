//! # Meter Address
//!
//! A DL/T 645 address is six bytes, written by people as twelve hex digits
//! (most significant first) and transmitted least significant byte first.

use std::fmt;
use std::str::FromStr;

use crate::constants::DLT645_ADDRESS_LEN;
use crate::error::Dlt645Error;

/// Six-byte meter address, held in display order (most significant byte first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MeterAddress([u8; DLT645_ADDRESS_LEN]);

impl MeterAddress {
    /// Broadcast address `999999999999`.
    pub const BROADCAST: MeterAddress = MeterAddress([0x99; DLT645_ADDRESS_LEN]);

    /// Address-discovery placeholder `AAAAAAAAAAAA`, used when the meter's
    /// address is unknown.
    pub const DISCOVERY: MeterAddress = MeterAddress([0xAA; DLT645_ADDRESS_LEN]);

    pub const fn new(bytes: [u8; DLT645_ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses 1 to 12 hex digits, left-padding with zeros to 12.
    pub fn parse(s: &str) -> Result<Self, Dlt645Error> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Dlt645Error::AddressFormat("address is empty".to_string()));
        }
        if s.len() > DLT645_ADDRESS_LEN * 2 {
            return Err(Dlt645Error::AddressFormat(format!(
                "address too long: {} digits",
                s.len()
            )));
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(Dlt645Error::AddressFormat(format!(
                "invalid hex digit {c:?} in {s:?}"
            )));
        }

        let padded = format!("{s:0>12}");
        let mut bytes = [0u8; DLT645_ADDRESS_LEN];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|e| Dlt645Error::AddressFormat(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Builds an address from its six wire-order bytes.
    pub fn from_wire(wire: &[u8]) -> Result<Self, Dlt645Error> {
        let mut bytes: [u8; DLT645_ADDRESS_LEN] = wire.try_into().map_err(|_| {
            Dlt645Error::AddressFormat(format!(
                "expected {DLT645_ADDRESS_LEN} address bytes, got {}",
                wire.len()
            ))
        })?;
        bytes.reverse();
        Ok(Self(bytes))
    }

    /// Returns the address in transmission order (least significant byte first).
    pub fn to_wire(&self) -> [u8; DLT645_ADDRESS_LEN] {
        let mut wire = self.0;
        wire.reverse();
        wire
    }

    /// Returns the address bytes in display order.
    pub fn as_bytes(&self) -> &[u8; DLT645_ADDRESS_LEN] {
        &self.0
    }

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    pub fn is_discovery(&self) -> bool {
        *self == Self::DISCOVERY
    }
}

impl fmt::Display for MeterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

impl FromStr for MeterAddress {
    type Err = Dlt645Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_left() {
        let addr = MeterAddress::parse("1234").unwrap();
        assert_eq!(addr.as_bytes(), &[0x00, 0x00, 0x00, 0x00, 0x12, 0x34]);
        assert_eq!(addr.to_string(), "000000001234");
    }

    #[test]
    fn test_parse_odd_digit_count() {
        let addr = MeterAddress::parse("abc").unwrap();
        assert_eq!(addr.to_string(), "000000000ABC");
    }

    #[test]
    fn test_wire_order() {
        let addr = MeterAddress::parse("001122334455").unwrap();
        assert_eq!(addr.to_wire(), [0x55, 0x44, 0x33, 0x22, 0x11, 0x00]);
        assert_eq!(MeterAddress::from_wire(&addr.to_wire()).unwrap(), addr);
    }

    #[test]
    fn test_reserved_addresses() {
        assert!(MeterAddress::parse("999999999999").unwrap().is_broadcast());
        assert!(MeterAddress::parse("aaaaaaaaaaaa").unwrap().is_discovery());
        assert_eq!(MeterAddress::DISCOVERY.to_string(), "AAAAAAAAAAAA");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(MeterAddress::parse(""), Err(Dlt645Error::AddressFormat(_))));
        assert!(matches!(
            MeterAddress::parse("0123456789ABC"),
            Err(Dlt645Error::AddressFormat(_))
        ));
        assert!(matches!(MeterAddress::parse("12G4"), Err(Dlt645Error::AddressFormat(_))));
        assert!(MeterAddress::from_wire(&[0x01, 0x02]).is_err());
    }
}
