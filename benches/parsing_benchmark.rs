use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dlt645_rs::catalog::{MeterResponse, ResponseInterpreter};
use dlt645_rs::dlt645::frame::decode_frame;
use dlt645_rs::payload::data_encoding::{decode_bcd_values, ByteOrder};
use dlt645_rs::util::hex::hex_to_bytes;
use dlt645_rs::IdentRegistry;

fn benchmark_decode_frame(c: &mut Criterion) {
    let data = hex_to_bytes("FEFEFEFE68341200000000689106333434354C551E16");

    c.bench_function("decode_frame", |b| {
        b.iter(|| {
            let _ = black_box(decode_frame(black_box(&data)));
        })
    });
}

fn benchmark_decode_bcd(c: &mut Criterion) {
    let data = [0x19, 0x22, 0x05, 0x22, 0x98, 0x21];

    c.bench_function("decode_bcd_values", |b| {
        b.iter(|| {
            let _ = black_box(decode_bcd_values(black_box(&data), 2, ByteOrder::Little, 0.1, 0.0));
        })
    });
}

fn benchmark_interpret_response(c: &mut Criterion) {
    let frame = decode_frame(&hex_to_bytes("68341200000000689106333434354C551E16")).unwrap();
    let interp = ResponseInterpreter::new(IdentRegistry::with_defaults());

    c.bench_function("interpret_read_response", |b| {
        b.iter(|| {
            let result = interp.interpret(black_box(frame.control), black_box(&frame.data));
            let _ = black_box(matches!(result, Ok(MeterResponse::Read(_))));
        })
    });
}

criterion_group!(
    benches,
    benchmark_decode_frame,
    benchmark_decode_bcd,
    benchmark_interpret_response
);
criterion_main!(benches);
