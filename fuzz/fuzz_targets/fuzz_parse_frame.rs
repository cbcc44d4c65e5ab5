#![no_main]

use dlt645_rs::dlt645::frame::decode_frame;
use dlt645_rs::{IdentRegistry, ResponseInterpreter, StationInterpreter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary input must never panic the decoder
    if let Ok(frame) = decode_frame(data) {
        // Re-encoding a decoded frame must reproduce the wire bytes
        let start = data.iter().position(|b| *b == 0x68).unwrap_or(0);
        if let Ok(bytes) = frame.encode(&[]) {
            assert_eq!(&bytes[..], &data[start..start + bytes.len()]);
        }

        let _ = StationInterpreter::new().interpret_frame(&frame);
        let _ = ResponseInterpreter::new(IdentRegistry::with_defaults()).interpret_frame(&frame);
    }

    // Treat the input as a bare data domain for every control code
    if let Some((&control, rest)) = data.split_first() {
        let _ = StationInterpreter::new().interpret(control, rest);
        let _ = ResponseInterpreter::new(IdentRegistry::with_defaults()).interpret(control, rest);
    }
});
