//! # Response Interpreter
//!
//! Decodes frames sent back by meters, for use on the station side. Normal
//! read responses are matched against the [`IdentRegistry`]: registered
//! identifiers come back as scaled values, everything else as raw payload for
//! the caller to decode.

use log::{trace, warn};

use crate::catalog::view::{
    Acknowledgement, ErrorResponse, ReadResponse, UnregisteredResponse,
};
use crate::catalog::{require, Rejection};
use crate::constants::*;
use crate::dlt645::address::MeterAddress;
use crate::dlt645::frame::Frame;
use crate::error::Dlt645Error;
use crate::payload::data_encoding::ValueCodec;
use crate::payload::ident::DataIdent;
use crate::payload::registry::IdentRegistry;
use crate::util::hex::format_hex_compact;

/// A decoded meter response.
#[derive(Debug, Clone, PartialEq)]
pub enum MeterResponse<'a> {
    /// 0x91/0xB1/0x92/0xB2 for a registered identifier
    Read(ReadResponse),
    /// 0x91/0xB1/0x92/0xB2 for an identifier with no codec
    Unregistered(UnregisteredResponse<'a>),
    /// 0xD1/0xD2
    ReadError(ErrorResponse),
    /// 0x94/0xD4
    SetAck(Acknowledgement),
    /// 0x93
    Address(MeterAddress),
    /// 0x95
    SetAddressAck(MeterAddress),
    /// 0x96/0xD6
    FreezeAck(Acknowledgement),
}

/// Demultiplexer for meter-issued frames, owning the identifier registry.
///
/// Cloning shares the registry, so registrations made through one clone are
/// seen by all of them.
#[derive(Debug, Default, Clone)]
pub struct ResponseInterpreter {
    registry: IdentRegistry,
}

impl ResponseInterpreter {
    pub fn new(registry: IdentRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &IdentRegistry {
        &self.registry
    }

    /// Registers a codec for an identifier given DI3 first, e.g.
    /// `[0x02, 0x01, 0x01, 0x00]` for phase A voltage.
    pub fn register(&self, ident: [u8; DLT645_IDENT_LEN], codec: ValueCodec) {
        self.registry.register(ident, codec);
    }

    pub fn interpret_frame<'a>(&self, frame: &'a Frame) -> Result<MeterResponse<'a>, Rejection> {
        self.interpret(frame.control, &frame.data)
    }

    /// Interprets one control code and its un-stuffed data domain.
    pub fn interpret<'a>(
        &self,
        control: u8,
        data: &'a [u8],
    ) -> Result<MeterResponse<'a>, Rejection> {
        self.dispatch(control, data).map_err(|error| {
            warn!(
                "Rejected meter response ctrl={control:#04X} data=[{}]: {error}",
                format_hex_compact(data)
            );
            Rejection::new(control, data, error)
        })
    }

    fn dispatch<'a>(&self, control: u8, data: &'a [u8]) -> Result<MeterResponse<'a>, Dlt645Error> {
        match control {
            CTRL_READ_RESPONSE | CTRL_READ_RESPONSE_MORE => {
                self.read_response(control, data, false)
            }
            CTRL_READ_NEXT_RESPONSE | CTRL_READ_NEXT_RESPONSE_MORE => {
                self.read_response(control, data, true)
            }
            CTRL_READ_ERROR | CTRL_READ_NEXT_ERROR => {
                require(control, data, 1)?;
                Ok(MeterResponse::ReadError(ErrorResponse::new(control, data[0])))
            }
            CTRL_SET_RESPONSE => Ok(MeterResponse::SetAck(success_ack(data))),
            CTRL_SET_ERROR => {
                require(control, data, 1)?;
                Ok(MeterResponse::SetAck(Acknowledgement::new(false, data[0])))
            }
            CTRL_FREEZE_RESPONSE => Ok(MeterResponse::FreezeAck(success_ack(data))),
            CTRL_FREEZE_ERROR => {
                require(control, data, 1)?;
                Ok(MeterResponse::FreezeAck(Acknowledgement::new(false, data[0])))
            }
            CTRL_READ_ADDRESS_RESPONSE => {
                require(control, data, DLT645_ADDRESS_LEN)?;
                let address = MeterAddress::from_wire(&data[..DLT645_ADDRESS_LEN])?;
                Ok(MeterResponse::Address(address))
            }
            CTRL_SET_ADDRESS_RESPONSE => {
                require(control, data, DLT645_ADDRESS_LEN)?;
                let address = MeterAddress::from_wire(&data[..DLT645_ADDRESS_LEN])?;
                Ok(MeterResponse::SetAddressAck(address))
            }
            other => Err(Dlt645Error::FunctionCodeUnrecognized(other)),
        }
    }

    /// `ident(4) + value bytes [+ seq(1)]`
    fn read_response<'a>(
        &self,
        control: u8,
        data: &'a [u8],
        continuation: bool,
    ) -> Result<MeterResponse<'a>, Dlt645Error> {
        let required = if continuation {
            DLT645_IDENT_LEN + 1
        } else {
            DLT645_IDENT_LEN
        };
        require(control, data, required)?;

        let ident = DataIdent::from_wire([data[0], data[1], data[2], data[3]]);
        let (payload, sequence) = if continuation {
            let (body, seq) = data.split_at(data.len() - 1);
            (&body[DLT645_IDENT_LEN..], Some(seq[0]))
        } else {
            (&data[DLT645_IDENT_LEN..], None)
        };
        let has_more = control & CTRL_MASK_FOLLOWING != 0;

        match self.registry.get(&ident) {
            Some(codec) => {
                let values = codec.decode(payload)?;
                trace!("Decoded {ident}: {values:?} {}", codec.unit());
                Ok(MeterResponse::Read(ReadResponse::new(
                    control, ident, values, codec, has_more, sequence,
                )))
            }
            None => Ok(MeterResponse::Unregistered(UnregisteredResponse::new(
                control, ident, payload, has_more, sequence,
            ))),
        }
    }
}

fn success_ack(data: &[u8]) -> Acknowledgement {
    Acknowledgement::new(true, data.first().copied().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voltage_interpreter() -> ResponseInterpreter {
        let interp = ResponseInterpreter::default();
        interp.register([0x02, 0x01, 0x01, 0x00], ValueCodec::scaled(2, 0.1, "V").unwrap());
        interp
    }

    #[test]
    fn test_registered_read_response() {
        let data = [0x00, 0x01, 0x01, 0x02, 0x19, 0x22];
        let MeterResponse::Read(resp) = voltage_interpreter().interpret(CTRL_READ_RESPONSE, &data).unwrap() else {
            panic!("expected registered response");
        };
        assert_eq!(resp.ident(), DataIdent::from_u32(0x0201_0100));
        assert!((resp.value().unwrap() - 221.9).abs() < 1e-9);
        assert_eq!(resp.unit(), "V");
        assert!(!resp.has_more());
        assert_eq!(resp.sequence(), None);
    }

    #[test]
    fn test_continuation_strips_sequence() {
        let data = [0x00, 0x01, 0x01, 0x02, 0x19, 0x22, 0x03];
        let MeterResponse::Read(resp) = voltage_interpreter()
            .interpret(CTRL_READ_NEXT_RESPONSE_MORE, &data)
            .unwrap()
        else {
            panic!("expected registered response");
        };
        assert_eq!(resp.values().len(), 1);
        assert!(resp.has_more());
        assert_eq!(resp.sequence(), Some(3));
        assert!(resp.is_continuation());
    }

    #[test]
    fn test_unregistered_falls_back() {
        let data = [0x00, 0x00, 0x01, 0x00, 0x12, 0x34, 0x56, 0x78];
        let MeterResponse::Unregistered(resp) = voltage_interpreter()
            .interpret(CTRL_READ_RESPONSE_MORE, &data)
            .unwrap()
        else {
            panic!("expected fallback");
        };
        assert_eq!(resp.ident(), DataIdent::from_u32(0x0001_0000));
        assert_eq!(resp.payload(), &[0x12, 0x34, 0x56, 0x78]);
        assert!(resp.has_more());
    }

    #[test]
    fn test_identifier_only_response() {
        let data = [0x00, 0x01, 0x01, 0x02];
        let MeterResponse::Read(resp) = voltage_interpreter().interpret(CTRL_READ_RESPONSE, &data).unwrap() else {
            panic!("expected registered response");
        };
        assert!(resp.values().is_empty());
        assert_eq!(resp.value(), None);
    }

    #[test]
    fn test_bad_value_is_rejected() {
        let interp = voltage_interpreter();
        let data = [0x00, 0x01, 0x01, 0x02, 0x19];
        let rejection = interp.interpret(CTRL_READ_RESPONSE, &data).unwrap_err();
        assert_eq!(
            rejection.error,
            Dlt645Error::ValueLengthMismatch { len: 1, width: 2 }
        );
        assert_eq!(rejection.data, data.to_vec());
    }

    #[test]
    fn test_acknowledgements() {
        let interp = ResponseInterpreter::default();
        assert_eq!(
            interp.interpret(CTRL_SET_RESPONSE, &[]),
            Ok(MeterResponse::SetAck(Acknowledgement::new(true, 0)))
        );
        assert_eq!(
            interp.interpret(CTRL_FREEZE_ERROR, &[0x04]),
            Ok(MeterResponse::FreezeAck(Acknowledgement::new(false, 0x04)))
        );
        assert!(interp.interpret(CTRL_SET_ERROR, &[]).is_err());
    }
}
