//! Limb-based arithmetic in 𝔽ₚ where p = 2²⁵⁵ − 19.
//!
//! ## Representation
//!
//! Field elements are held as ten signed limbs of alternating width:
//!
//! ```text
//! [26, 25, 26, 25, 26, 25, 26, 25, 26, 25] bits
//! ```
//!
//! so limb `i` carries weight `2^⌈25.5·i⌉`. Limbs may be slightly out of
//! range between operations; every operation ends with a carry pass that
//! brings them back within the bounds multiplication relies on, and only
//! encoding performs the full reduction to the canonical residue.
//!
//! ## Constant-time
//!
//! No operation here branches on or indexes memory with limb values. The
//! exponentiation chains have a fixed shape.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use super::{ENCODED_LENGTH, FieldElement};
use crate::error::Error;
use crate::math::ct::ConstantTimeEq;

/// Bit width of each limb.
const WIDTH: [u32; 10] = [26, 25, 26, 25, 26, 25, 26, 25, 26, 25];

/// Load 3 bytes from a little-endian byte slice into a `u64`.
#[inline(always)]
pub(crate) fn load_3(input: &[u8]) -> u64 {
    (input[0] as u64) | ((input[1] as u64) << 8) | ((input[2] as u64) << 16)
}

/// Load 4 bytes from a little-endian byte slice into a `u64`.
#[inline(always)]
pub(crate) fn load_4(input: &[u8]) -> u64 {
    load_3(input) | ((input[3] as u64) << 24)
}

/// Field element modulo `2^255 - 19` in radix `2^25.5`.
#[derive(Clone, Copy, Default)]
pub struct Fe25519(pub(crate) [i32; 10]);

impl Fe25519 {
    /// The additive identity.
    pub const ZERO: Self = Fe25519([0; 10]);

    /// The multiplicative identity.
    pub const ONE: Self = Fe25519([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Builds an element from raw limbs.
    ///
    /// The limbs are taken as-is; the caller is responsible for keeping
    /// them within the documented widths.
    pub const fn from_limbs(limbs: [i32; 10]) -> Self {
        Fe25519(limbs)
    }

    /// Decode a field element from a 32-byte little-endian encoding.
    ///
    /// Bit 255 is ignored. Values in `[p, 2²⁵⁵)` are accepted and reduced.
    fn decode(input: &[u8; ENCODED_LENGTH]) -> Self {
        // (byte_offset, load_size, left_shift); the top limb is masked to
        // 23 bits so the sign bit never reaches the value.
        const LOADS: [(usize, usize, u32); 10] = [
            (0, 4, 0),
            (4, 3, 6),
            (7, 3, 5),
            (10, 3, 3),
            (13, 3, 2),
            (16, 4, 0),
            (20, 3, 7),
            (23, 3, 5),
            (26, 3, 4),
            (29, 3, 2),
        ];

        let mut h = [0i64; 10];
        for (index, &(offset, size, shift)) in LOADS.iter().enumerate() {
            let mut value = if size == 4 {
                load_4(&input[offset..])
            } else {
                load_3(&input[offset..])
            };
            if index == 9 {
                value &= 0x7f_ffff;
            }
            h[index] = (value << shift) as i64;
        }

        // Odd limbs first, then even ones, so no limb receives two carries.
        for index in (1..10).step_by(2) {
            let carry = (h[index] + (1i64 << 24)) >> 25;
            h[index] -= carry << 25;
            if index == 9 {
                h[0] += carry * 19;
            } else {
                h[index + 1] += carry;
            }
        }
        for index in (0..10).step_by(2) {
            let carry = (h[index] + (1i64 << 25)) >> 26;
            h[index] -= carry << 26;
            h[index + 1] += carry;
        }

        Fe25519(h.map(|x| x as i32))
    }

    /// Encode this element into its canonical 32-byte little-endian form.
    ///
    /// The value is first fully reduced modulo `p`: the quotient `q` of
    /// `h / p` is computed from the top limb downwards, `19·q` is folded
    /// into limb 0, and a single sequential carry chain leaves every limb in
    /// `[0, 2^width)`.
    fn encode(&self) -> [u8; ENCODED_LENGTH] {
        let mut h = self.0.map(|x| x as i64);

        let mut q = (19 * h[9] + (1i64 << 24)) >> 25;
        for (limb, width) in h.iter().zip(WIDTH) {
            q = (limb + q) >> width;
        }

        h[0] += 19 * q;

        for index in 0..9 {
            let carry = h[index] >> WIDTH[index];
            h[index] -= carry << WIDTH[index];
            h[index + 1] += carry;
        }
        let carry = h[9] >> 25;
        h[9] -= carry << 25;

        // 255 bits: 31 whole bytes plus 7 bits for the last one.
        let mut output = [0u8; ENCODED_LENGTH];
        let mut acc = 0u64;
        let mut bits = 0u32;
        let mut position = 0;
        for (limb, width) in h.iter().zip(WIDTH) {
            acc |= (*limb as u64) << bits;
            bits += width;
            while bits >= 8 {
                output[position] = acc as u8;
                acc >>= 8;
                bits -= 8;
                position += 1;
            }
        }
        output[position] = acc as u8;

        output
    }

    /// Propagates carries through a wide accumulator.
    ///
    /// Carries are interleaved (`0→1` with `4→5`, `1→2` with `5→6`, ...) so
    /// the dependency chain stays short; limb 9 wraps into limb 0 as `19·c`.
    fn carry(mut h: [i64; 10]) -> Self {
        #[inline(always)]
        fn step(h: &mut [i64; 10], index: usize) {
            let width = WIDTH[index];
            let carry = (h[index] + (1i64 << (width - 1))) >> width;
            h[index] -= carry << width;
            if index == 9 {
                h[0] += carry * 19;
            } else {
                h[index + 1] += carry;
            }
        }

        for index in [0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0] {
            step(&mut h, index);
        }

        Fe25519(h.map(|x| x as i32))
    }

    /// Schoolbook product of two limb vectors before carrying.
    ///
    /// Two odd limbs multiply to a half-integer power of two, hence the
    /// doubling; products landing above limb 9 wrap with `2²⁵⁵ ≡ 19`.
    #[inline(always)]
    fn product(f: &[i32; 10], g: &[i32; 10]) -> [i64; 10] {
        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in 0..10 {
                let mut term = f[i] as i64 * g[j] as i64;
                if i & j & 1 == 1 {
                    term *= 2;
                }
                if i + j >= 10 {
                    h[i + j - 10] += term * 19;
                } else {
                    h[i + j] += term;
                }
            }
        }
        h
    }

    /// Squares this element `n` times.
    ///
    /// The number of iterations depends only on `n`.
    pub(crate) fn n_square(self, n: usize) -> Self {
        (0..n).fold(self, |acc, _| acc * acc)
    }

    /// Computes `self^((p − 5) / 8) = self^(2²⁵² − 3)`.
    ///
    /// ## Algorithm
    ///
    /// Fixed addition chain: 250 squarings and 11 multiplications, shared
    /// with [`Fe25519::inverse`] up to `self^(2²⁵⁰ − 1)`.
    pub(crate) fn pow22523_chain(self) -> Self {
        let mut t0 = self * self;
        let mut t1 = t0.n_square(2);
        t1 = self * t1;
        t0 = t0 * t1;
        t0 = t0 * t0;
        t0 = t1 * t0;
        t1 = t0.n_square(5);
        t0 = t1 * t0;
        t1 = t0.n_square(10);
        t1 = t1 * t0;
        let mut t2 = t1.n_square(20);
        t1 = t2 * t1;
        t1 = t1.n_square(10);
        t0 = t1 * t0;
        t1 = t0.n_square(50);
        t1 = t1 * t0;
        t2 = t1.n_square(100);
        t1 = t2 * t1;
        t1 = t1.n_square(50);
        t0 = t1 * t0;
        t0 = t0.n_square(2);
        t0 * self
    }

    /// Computes the multiplicative inverse via Fermat: `self^(p − 2)`.
    ///
    /// Zero maps to zero.
    ///
    /// ## Constant-time
    ///
    /// The chain is fixed; only the data flowing through it varies.
    pub(crate) fn inverse(self) -> Self {
        let mut t0 = self * self;
        let mut t1 = t0.n_square(2);
        t1 = self * t1;
        t0 = t0 * t1;
        let mut t2 = t0 * t0;
        t1 = t1 * t2;
        t2 = t1.n_square(5);
        t1 = t2 * t1;
        t2 = t1.n_square(10);
        t2 = t2 * t1;
        let mut t3 = t2.n_square(20);
        t2 = t3 * t2;
        t2 = t2.n_square(10);
        t1 = t2 * t1;
        t2 = t1.n_square(50);
        t2 = t2 * t1;
        t3 = t2.n_square(100);
        t2 = t3 * t2;
        t2 = t2.n_square(50);
        t1 = t2 * t1;
        t1 = t1.n_square(5);
        t1 * t0
    }
}

impl FieldElement for Fe25519 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn one() -> Self {
        Self::ONE
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: &[u8; ENCODED_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength {
                expected: ENCODED_LENGTH,
                actual: bytes.len(),
            })?;
        Ok(Self::decode(bytes))
    }

    fn to_bytes(&self) -> [u8; ENCODED_LENGTH] {
        self.encode()
    }

    fn add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }

    fn subtract(&self, rhs: &Self) -> Self {
        *self - *rhs
    }

    fn negate(&self) -> Self {
        -*self
    }

    fn multiply(&self, rhs: &Self) -> Self {
        *self * *rhs
    }

    fn square(&self) -> Self {
        *self * *self
    }

    fn square_and_double(&self) -> Self {
        let h = Self::product(&self.0, &self.0);
        Self::carry(h.map(|x| x << 1))
    }

    fn invert(&self) -> Self {
        self.inverse()
    }

    fn pow22523(&self) -> Self {
        self.pow22523_chain()
    }

    /// ## Constant-time
    ///
    /// The selection is a masked XOR over all ten limbs.
    fn cmov(&self, other: &Self, bit: u8) -> Self {
        let mask = -((bit & 1) as i32);
        let mut limbs = self.0;
        for (s, o) in limbs.iter_mut().zip(other.0.iter()) {
            *s ^= (*s ^ o) & mask;
        }
        Fe25519(limbs)
    }
}

/// Limb-wise sum followed by a carry pass.
impl Add for Fe25519 {
    type Output = Fe25519;

    fn add(self, rhs: Self) -> Self::Output {
        let mut h = [0i64; 10];
        for (index, out) in h.iter_mut().enumerate() {
            *out = self.0[index] as i64 + rhs.0[index] as i64;
        }
        Self::carry(h)
    }
}

impl Sub for Fe25519 {
    type Output = Fe25519;

    fn sub(self, rhs: Self) -> Self::Output {
        let mut h = [0i64; 10];
        for (index, out) in h.iter_mut().enumerate() {
            *out = self.0[index] as i64 - rhs.0[index] as i64;
        }
        Self::carry(h)
    }
}

impl Mul for Fe25519 {
    type Output = Fe25519;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::carry(Self::product(&self.0, &rhs.0))
    }
}

/// Negation is exact on limbs and needs no carry.
impl Neg for Fe25519 {
    type Output = Fe25519;

    fn neg(self) -> Self::Output {
        Fe25519(self.0.map(|x| -x))
    }
}

impl PartialEq for Fe25519 {
    fn eq(&self, other: &Self) -> bool {
        self.encode().ct_eq(&other.encode())
    }
}

impl Eq for Fe25519 {}

impl fmt::Debug for Fe25519 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fe25519(")?;
        for byte in self.encode() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
