use eddsa::{Engine, PrivateKey, params};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_ed25519(c: &mut Criterion) {
    let key = PrivateKey::from_seed(&[7u8; 32], params::ed25519().unwrap()).unwrap();
    let message = [0u8; 64];

    let mut signer = Engine::new();
    signer.init_sign(&key).unwrap();
    let signature = signer.sign_one_shot(&message).unwrap();

    c.bench_function("ed25519 key from seed", |b| {
        b.iter(|| PrivateKey::from_seed(black_box(&[7u8; 32]), params::ed25519().unwrap()))
    });

    c.bench_function("ed25519 sign 64 bytes", |b| {
        b.iter(|| signer.sign_one_shot(black_box(&message)).unwrap())
    });

    let mut verifier = Engine::new();
    verifier.init_verify(key.public_key()).unwrap();
    c.bench_function("ed25519 verify 64 bytes", |b| {
        b.iter(|| {
            verifier
                .verify_one_shot(black_box(&message), black_box(signature.as_bytes()))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_ed25519);
criterion_main!(benches);
