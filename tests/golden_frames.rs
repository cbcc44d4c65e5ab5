//! Golden frames: hand-checked wire bytes for common exchanges.

use dlt645_rs::catalog::*;
use dlt645_rs::util::hex::hex_to_bytes;
use dlt645_rs::{decode_frame, DataIdent, IdentRegistry, MeterAddress, MeterValue};

struct Golden {
    name: &'static str,
    hex: &'static str,
    build: fn() -> Vec<u8>,
}

fn meter() -> MeterAddress {
    MeterAddress::parse("000000001234").unwrap()
}

const GOLDEN: &[Golden] = &[
    Golden {
        name: "read phase A voltage",
        hex: "68 34 12 00 00 00 00 68 11 04 33 34 34 35 FB 16",
        build: || build_read_request(&meter(), DataIdent::from_u32(0x0201_0100), None, &[]).unwrap(),
    },
    Golden {
        name: "phase A voltage 221.9 V",
        hex: "68 34 12 00 00 00 00 68 91 06 33 34 34 35 4C 55 1E 16",
        build: || {
            let value = MeterValue::scalar(2219, 2);
            build_read_response(&meter(), DataIdent::from_u32(0x0201_0100), Some(&value), false, &[])
                .unwrap()
        },
    },
    Golden {
        name: "read address",
        hex: "68 AA AA AA AA AA AA 68 13 00 DF 16",
        build: || build_read_address_request(&[]).unwrap(),
    },
    Golden {
        name: "read address with wake-up",
        hex: "FE FE FE FE 68 AA AA AA AA AA AA 68 13 00 DF 16",
        build: || build_read_address_request(&[0xFE; 4]).unwrap(),
    },
];

/// Tests that every builder reproduces its golden frame byte for byte.
#[test]
fn test_builders_match_golden_frames() {
    for golden in GOLDEN {
        assert_eq!((golden.build)(), hex_to_bytes(golden.hex), "{}", golden.name);
    }
}

/// Tests that every golden frame decodes and re-encodes unchanged.
#[test]
fn test_golden_frames_decode() {
    for golden in GOLDEN {
        let bytes = hex_to_bytes(golden.hex);
        let frame = decode_frame(&bytes).unwrap_or_else(|e| panic!("{}: {e}", golden.name));
        let start = bytes.iter().position(|b| *b == 0x68).unwrap();
        assert_eq!(frame.encode(&bytes[..start]).unwrap(), bytes, "{}", golden.name);
    }
}

/// Tests the golden voltage response through the default registry.
#[test]
fn test_golden_voltage_value() {
    let frame = decode_frame(&hex_to_bytes("68 34 12 00 00 00 00 68 91 06 33 34 34 35 4C 55 1E 16")).unwrap();
    let interp = ResponseInterpreter::new(IdentRegistry::with_defaults());
    let Ok(MeterResponse::Read(resp)) = interp.interpret_frame(&frame) else {
        panic!("expected registered response");
    };
    assert!((resp.value().unwrap() - 221.9).abs() < 1e-9);
}
