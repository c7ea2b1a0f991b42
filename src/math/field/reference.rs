//! Arbitrary-precision field backend.
//!
//! Every value is kept fully reduced in `[0, q)`, so equality is plain
//! integer equality. This backend is slow and not constant-time; it exists
//! to check [`Fe25519`](super::Fe25519) against an obviously correct model.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use super::{ENCODED_LENGTH, FieldElement};
use crate::error::Error;

/// `2²⁵⁵ − 19`.
static MODULUS: Lazy<BigUint> = Lazy::new(|| (BigUint::one() << 255u32) - 19u32);

/// `q − 2`, the inversion exponent.
static INVERT_EXPONENT: Lazy<BigUint> = Lazy::new(|| &*MODULUS - 2u32);

/// `(q − 5) / 8`.
static SQRT_EXPONENT: Lazy<BigUint> = Lazy::new(|| (&*MODULUS - 5u32) >> 3u32);

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigFieldElement(BigUint);

impl BigFieldElement {
    fn reduced(value: BigUint) -> Self {
        BigFieldElement(value % &*MODULUS)
    }

    /// The reduced value.
    pub fn value(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for BigFieldElement {
    fn from(value: BigUint) -> Self {
        Self::reduced(value)
    }
}

impl FieldElement for BigFieldElement {
    fn zero() -> Self {
        BigFieldElement(BigUint::zero())
    }

    fn one() -> Self {
        BigFieldElement(BigUint::one())
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let mut bytes: [u8; ENCODED_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength {
                expected: ENCODED_LENGTH,
                actual: bytes.len(),
            })?;
        bytes[ENCODED_LENGTH - 1] &= 0x7f;
        Ok(Self::reduced(BigUint::from_bytes_le(&bytes)))
    }

    fn to_bytes(&self) -> [u8; ENCODED_LENGTH] {
        let mut out = [0u8; ENCODED_LENGTH];
        let le = self.0.to_bytes_le();
        out[..le.len()].copy_from_slice(&le);
        out
    }

    fn add(&self, rhs: &Self) -> Self {
        Self::reduced(&self.0 + &rhs.0)
    }

    fn subtract(&self, rhs: &Self) -> Self {
        Self::reduced(&self.0 + &*MODULUS - &rhs.0)
    }

    fn negate(&self) -> Self {
        Self::reduced(&*MODULUS - &self.0)
    }

    fn multiply(&self, rhs: &Self) -> Self {
        Self::reduced(&self.0 * &rhs.0)
    }

    fn square(&self) -> Self {
        self.multiply(self)
    }

    fn square_and_double(&self) -> Self {
        Self::reduced((&self.0 * &self.0) << 1u32)
    }

    fn invert(&self) -> Self {
        BigFieldElement(self.0.modpow(&INVERT_EXPONENT, &MODULUS))
    }

    fn pow22523(&self) -> Self {
        BigFieldElement(self.0.modpow(&SQRT_EXPONENT, &MODULUS))
    }

    fn cmov(&self, other: &Self, bit: u8) -> Self {
        if bit & 1 == 1 { other.clone() } else { self.clone() }
    }

    fn is_non_zero(&self) -> bool {
        !self.0.is_zero()
    }
}

impl fmt::Debug for BigFieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigFieldElement({:x})", self.0)
    }
}
