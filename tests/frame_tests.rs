//! Tests for the `dlt645::frame` module: decoding, encoding and integrity checks.

use dlt645_rs::constants::DLT645_WAKE_UP;
use dlt645_rs::dlt645::frame::{decode_frame, decode_frame_partial, encode_frame, Frame};
use dlt645_rs::dlt645::MeterAddress;
use dlt645_rs::Dlt645Error;
use proptest::prelude::*;

const READ_VOLTAGE: [u8; 16] = [
    0x68, 0x34, 0x12, 0x00, 0x00, 0x00, 0x00, 0x68, 0x11, 0x04, 0x33, 0x34, 0x34, 0x35, 0xFB, 0x16,
];

/// Tests the read-voltage request against its known wire form.
#[test]
fn test_encode_read_voltage() {
    let bytes = encode_frame("000000001234", 0x11, &[0x00, 0x01, 0x01, 0x02], None).unwrap();
    assert_eq!(bytes, READ_VOLTAGE);
}

/// Tests that the read-voltage request decodes back to its fields.
#[test]
fn test_decode_read_voltage() {
    let frame = decode_frame(&READ_VOLTAGE).unwrap();
    assert_eq!(frame.address.to_string(), "000000001234");
    assert_eq!(frame.control, 0x11);
    assert_eq!(frame.data, vec![0x00, 0x01, 0x01, 0x02]);
    assert_eq!(frame.checksum(), 0xFB);
}

/// Tests that a wake-up prefix is prepended unchecksummed and skipped on decode.
#[test]
fn test_wake_up_prefix() {
    let bytes = encode_frame("1234", 0x11, &[0x00, 0x01, 0x01, 0x02], Some(&DLT645_WAKE_UP[..])).unwrap();
    assert_eq!(&bytes[..4], &DLT645_WAKE_UP);
    assert_eq!(&bytes[4..], &READ_VOLTAGE);
    assert_eq!(decode_frame(&bytes).unwrap(), decode_frame(&READ_VOLTAGE).unwrap());
}

/// Tests that a corrupted checksum byte is reported with both values.
#[test]
fn test_checksum_mismatch() {
    let mut bytes = READ_VOLTAGE;
    bytes[14] = 0xFC;
    assert_eq!(
        decode_frame(&bytes),
        Err(Dlt645Error::ChecksumMismatch {
            expected: 0xFC,
            calculated: 0xFB
        })
    );
}

/// Tests that a wrong end character is rejected after the checksum passes.
#[test]
fn test_bad_end_character() {
    let mut bytes = READ_VOLTAGE;
    bytes[15] = 0x17;
    assert!(matches!(decode_frame(&bytes), Err(Dlt645Error::FrameFormat(_))));
}

/// Tests that a missing second start character is a format error.
#[test]
fn test_missing_second_start() {
    let mut bytes = READ_VOLTAGE;
    bytes[7] = 0x00;
    assert!(matches!(decode_frame(&bytes), Err(Dlt645Error::FrameFormat(_))));
}

/// Tests that every truncation of a valid frame is reported as incomplete.
#[test]
fn test_truncated_frames() {
    for len in 0..READ_VOLTAGE.len() {
        assert_eq!(
            decode_frame(&READ_VOLTAGE[..len]),
            Err(Dlt645Error::Incomplete),
            "prefix of {len} bytes"
        );
    }
}

/// Tests that two frames in one buffer decode one after the other.
#[test]
fn test_back_to_back_frames() {
    let second = encode_frame("AAAAAAAAAAAA", 0x13, &[], None).unwrap();
    let mut buf = READ_VOLTAGE.to_vec();
    buf.extend_from_slice(&second);

    let (rest, first) = decode_frame_partial(&buf).unwrap();
    assert_eq!(first.control, 0x11);
    let (rest, next) = decode_frame_partial(rest).unwrap();
    assert!(rest.is_empty());
    assert!(next.address.is_discovery());
    assert!(next.data.is_empty());
}

/// Tests address validation on encode.
#[test]
fn test_encode_rejects_bad_address() {
    assert!(matches!(
        encode_frame("1234567890ABC", 0x11, &[], None),
        Err(Dlt645Error::AddressFormat(_))
    ));
    assert!(matches!(
        encode_frame("12G4", 0x11, &[], None),
        Err(Dlt645Error::AddressFormat(_))
    ));
    assert!(matches!(
        encode_frame("", 0x11, &[], None),
        Err(Dlt645Error::AddressFormat(_))
    ));
}

/// Tests that a data domain longer than the length byte allows is refused.
#[test]
fn test_encode_rejects_oversized_data() {
    let frame = Frame::new(MeterAddress::BROADCAST, 0x14, vec![0; 256]);
    assert_eq!(frame.encode(&[]), Err(Dlt645Error::FrameTooLarge(256)));
    let frame = Frame::new(MeterAddress::BROADCAST, 0x14, vec![0; 255]);
    assert_eq!(frame.encode(&[]).unwrap().len(), 255 + 12);
}

/// Tests that changing any address, control or data byte breaks the checksum.
#[test]
fn test_checksum_detects_single_bit_flips() {
    let bytes = encode_frame("210987654321", 0x14, &[0x10, 0x20, 0x30, 0x40, 0x50], None).unwrap();
    let data_end = 10 + 5;
    let covered = (1..7).chain(8..9).chain(10..data_end);

    for index in covered {
        for bit in 0..8 {
            let mut mutated = bytes.clone();
            mutated[index] ^= 1 << bit;
            assert!(
                matches!(decode_frame(&mutated), Err(Dlt645Error::ChecksumMismatch { .. })),
                "flip of bit {bit} in byte {index} went undetected"
            );
        }
    }
}

mod prop_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_frame_round_trip(
            address in "[0-9a-fA-F]{1,12}",
            control in any::<u8>(),
            data in proptest::collection::vec(any::<u8>(), 0..=255),
        ) {
            let bytes = encode_frame(&address, control, &data, None).unwrap();
            let frame = decode_frame(&bytes).unwrap();
            prop_assert_eq!(frame.address.to_string(), format!("{:0>12}", address.to_uppercase()));
            prop_assert_eq!(frame.control, control);
            prop_assert_eq!(frame.data, data);
        }

        #[test]
        fn prop_sync_recovery(
            noise in proptest::collection::vec(any::<u8>().prop_filter("not a start byte", |b| *b != 0x68), 1..32),
        ) {
            let mut bytes = noise;
            bytes.extend_from_slice(&READ_VOLTAGE);
            prop_assert_eq!(decode_frame(&bytes), decode_frame(&READ_VOLTAGE));
        }
    }
}
