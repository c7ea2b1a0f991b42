use num_bigint::BigUint;
use once_cell::sync::Lazy;

use super::{GROUP_ORDER, SCALAR_LENGTH, ScalarOps};

static ORDER: Lazy<BigUint> = Lazy::new(|| BigUint::from_bytes_le(&GROUP_ORDER));

fn encode(value: &BigUint) -> [u8; SCALAR_LENGTH] {
    let mut out = [0u8; SCALAR_LENGTH];
    let le = value.to_bytes_le();
    out[..le.len()].copy_from_slice(&le);
    out
}

/// Arbitrary-precision scalar arithmetic. Variable time; for cross-checks.
#[derive(Clone, Copy, Debug, Default)]
pub struct BigScalarOps;

impl ScalarOps for BigScalarOps {
    fn reduce(&self, s: &[u8; 64]) -> [u8; SCALAR_LENGTH] {
        encode(&(BigUint::from_bytes_le(s) % &*ORDER))
    }

    fn multiply_and_add(
        &self,
        a: &[u8; SCALAR_LENGTH],
        b: &[u8; SCALAR_LENGTH],
        c: &[u8; SCALAR_LENGTH],
    ) -> [u8; SCALAR_LENGTH] {
        let a = BigUint::from_bytes_le(a);
        let b = BigUint::from_bytes_le(b);
        let c = BigUint::from_bytes_le(c);
        encode(&((a * b + c) % &*ORDER))
    }
}
