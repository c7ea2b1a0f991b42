//! Prime field abstraction.
//!
//! [`FieldElement`] is the capability every backend provides: a residue
//! modulo `q = 2²⁵⁵ − 19` with arithmetic, constant-time selection and the
//! canonical 32-byte little-endian encoding. Two backends implement it:
//!
//! - [`Fe25519`]: ten signed 26/25-bit limbs, constant-time, the default.
//! - [`BigFieldElement`]: arbitrary precision, used to cross-check the
//!   limb arithmetic.
//!
//! A computation never mixes the two; everything generic over the field is
//! parameterised by a single `F`.

mod fe25519;
mod reference;

pub use fe25519::Fe25519;
pub use reference::BigFieldElement;

use std::fmt::Debug;

use crate::error::Error;
use crate::math::ct::ConstantTimeEq;

/// Length in bytes of an encoded field element.
pub const ENCODED_LENGTH: usize = 32;

/// An element of the Ed25519 base field.
///
/// Values are immutable: every operation returns a fresh element.
pub trait FieldElement: Clone + Debug + Send + Sync + Sized + 'static {
    fn zero() -> Self;

    fn one() -> Self;

    /// Decodes 32 little-endian bytes, ignoring bit 255.
    ///
    /// Any other length is rejected.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Error>;

    /// Canonical little-endian encoding of the reduced value.
    fn to_bytes(&self) -> [u8; ENCODED_LENGTH];

    fn add(&self, rhs: &Self) -> Self;

    fn subtract(&self, rhs: &Self) -> Self;

    fn negate(&self) -> Self;

    fn multiply(&self, rhs: &Self) -> Self;

    fn square(&self) -> Self;

    /// `2 · self²`.
    fn square_and_double(&self) -> Self;

    /// `self^(q − 2)`, the multiplicative inverse of a non-zero element.
    fn invert(&self) -> Self;

    /// `self^((q − 5) / 8)`, used when recovering `x` from `y`.
    fn pow22523(&self) -> Self;

    /// Returns `other` when `bit == 1` and `self` when `bit == 0`.
    ///
    /// ## Constant-time
    ///
    /// Implementations must select with masks, never with a branch.
    fn cmov(&self, other: &Self, bit: u8) -> Self;

    fn is_non_zero(&self) -> bool {
        self.to_bytes().iter().fold(0u8, |acc, &b| acc | b) != 0
    }

    /// Bit 0 of the canonical encoding.
    fn is_negative(&self) -> bool {
        self.to_bytes()[0] & 1 == 1
    }

    fn divide(&self, rhs: &Self) -> Self {
        self.multiply(&rhs.invert())
    }

    fn add_one(&self) -> Self {
        self.add(&Self::one())
    }

    fn subtract_one(&self) -> Self {
        self.subtract(&Self::one())
    }

    /// Variable-time `self^e` for a little-endian exponent.
    fn pow(&self, exponent: &[u8]) -> Self {
        let mut result = Self::one();
        for byte in exponent.iter().rev() {
            for bit in (0..8).rev() {
                result = result.square();
                if (byte >> bit) & 1 == 1 {
                    result = result.multiply(self);
                }
            }
        }
        result
    }

    /// Equality of the residues, independent of the internal form.
    fn ct_eq(&self, other: &Self) -> bool {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

/// The prime field a curve is defined over.
///
/// Holds the bit width `b`, the modulus as an integer, the small constants
/// the group law needs, and the two exponents behind inversion and the
/// square root.
#[derive(Clone, Debug)]
pub struct FiniteField<F> {
    b: usize,
    q: [u8; ENCODED_LENGTH],
    q_minus_2: [u8; ENCODED_LENGTH],
    q_minus_5_div_8: [u8; ENCODED_LENGTH],
    zero: F,
    one: F,
    two: F,
    four: F,
    five: F,
    eight: F,
}

impl<F: FieldElement> FiniteField<F> {
    /// Builds the field of bit width `b` from the little-endian modulus.
    pub fn new(b: usize, q: &[u8]) -> Result<Self, Error> {
        let q: [u8; ENCODED_LENGTH] = q.try_into().map_err(|_| Error::InvalidLength {
            expected: ENCODED_LENGTH,
            actual: q.len(),
        })?;

        let q_minus_2 = sub_small(&q, 2);
        let q_minus_5_div_8 = shr3(&sub_small(&q, 5));

        Ok(Self {
            b,
            q,
            q_minus_2,
            q_minus_5_div_8,
            zero: F::zero(),
            one: F::one(),
            two: small(2)?,
            four: small(4)?,
            five: small(5)?,
            eight: small(8)?,
        })
    }

    /// Bit width of encodings; `b / 8` bytes per point or scalar.
    #[inline]
    pub fn b(&self) -> usize {
        self.b
    }

    #[inline]
    pub fn q(&self) -> &[u8; ENCODED_LENGTH] {
        &self.q
    }

    #[inline]
    pub fn q_minus_2(&self) -> &[u8; ENCODED_LENGTH] {
        &self.q_minus_2
    }

    #[inline]
    pub fn q_minus_5_div_8(&self) -> &[u8; ENCODED_LENGTH] {
        &self.q_minus_5_div_8
    }

    pub fn zero(&self) -> &F {
        &self.zero
    }

    pub fn one(&self) -> &F {
        &self.one
    }

    pub fn two(&self) -> &F {
        &self.two
    }

    pub fn four(&self) -> &F {
        &self.four
    }

    pub fn five(&self) -> &F {
        &self.five
    }

    pub fn eight(&self) -> &F {
        &self.eight
    }

    /// Decodes an element of this field.
    pub fn decode(&self, bytes: &[u8]) -> Result<F, Error> {
        F::from_bytes(bytes)
    }
}

fn small<F: FieldElement>(value: u8) -> Result<F, Error> {
    let mut bytes = [0u8; ENCODED_LENGTH];
    bytes[0] = value;
    F::from_bytes(&bytes)
}

fn sub_small(value: &[u8; ENCODED_LENGTH], rhs: u8) -> [u8; ENCODED_LENGTH] {
    let mut out = *value;
    let mut borrow = rhs as i16;
    for byte in out.iter_mut() {
        let diff = *byte as i16 - borrow;
        *byte = diff as u8;
        borrow = if diff < 0 { 1 } else { 0 };
    }
    out
}

fn shr3(value: &[u8; ENCODED_LENGTH]) -> [u8; ENCODED_LENGTH] {
    let mut out = [0u8; ENCODED_LENGTH];
    for index in 0..ENCODED_LENGTH {
        let high = value.get(index + 1).copied().unwrap_or(0);
        out[index] = (value[index] >> 3) | (high << 5);
    }
    out
}
