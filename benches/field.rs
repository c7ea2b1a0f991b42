use eddsa::math::{Fe25519, FieldElement};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_field(c: &mut Criterion) {
    let a = Fe25519::from_bytes(&[0x5a; 32]).unwrap();
    let b = Fe25519::from_bytes(&[0x3c; 32]).unwrap();

    c.bench_function("fe25519 multiply", |bench| {
        bench.iter(|| black_box(&a).multiply(black_box(&b)))
    });

    c.bench_function("fe25519 square", |bench| {
        bench.iter(|| black_box(&a).square())
    });

    c.bench_function("fe25519 invert", |bench| {
        bench.iter(|| black_box(&a).invert())
    });

    c.bench_function("fe25519 encode", |bench| {
        bench.iter(|| black_box(&a).to_bytes())
    });
}

criterion_group!(benches, bench_field);
criterion_main!(benches);
