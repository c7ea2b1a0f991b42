//! Scalar arithmetic modulo ℓ in radix 2²¹.
//!
//! ```text
//! ℓ = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! Operands are split into signed 21-bit limbs held in `i64`. Limb `k`
//! carries weight `2^(21k)`, so limb 12 sits at `2^252` and can be folded
//! back using
//!
//! ```text
//! 2^252 ≡ −27742317777372353535851937790883648493 (mod ℓ)
//! ```
//!
//! whose radix-2²¹ digits are [`FOLD`]. Folding the top limbs twice, with
//! carry passes in between, leaves a value in `[0, ℓ)`.
//!
//! ## Constant-time
//!
//! Every loop bound is fixed and no branch depends on limb values.

use super::ScalarOps;

const MASK: u64 = (1 << 21) - 1;

/// `−(ℓ − 2^252)` in radix 2²¹, least significant first.
const FOLD: [i64; 6] = [666_643, 470_296, 654_183, -997_805, 136_657, -683_901];

/// Splits a little-endian integer into `N` limbs of 21 bits.
///
/// The last limb keeps every remaining bit.
fn load<const N: usize>(bytes: &[u8]) -> [i64; N] {
    std::array::from_fn(|k| {
        let bit = 21 * k;
        let offset = bit / 8;

        let mut window = 0u64;
        for (j, byte) in bytes.iter().skip(offset).take(8).enumerate() {
            window |= (*byte as u64) << (8 * j);
        }
        window >>= bit % 8;

        if k + 1 < N {
            (window & MASK) as i64
        } else {
            window as i64
        }
    })
}

/// Rounding carry from limb `i` into limb `i + 1`; leaves limb `i` in
/// `[−2^20, 2^20)`.
#[inline(always)]
fn carry(s: &mut [i64; 24], i: usize) {
    let c = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += c;
    s[i] -= c << 21;
}

/// Floor carry from limb `i` into limb `i + 1`; leaves limb `i` in
/// `[0, 2^21)`.
#[inline(always)]
fn carry_floor(s: &mut [i64; 24], i: usize) {
    let c = s[i] >> 21;
    s[i + 1] += c;
    s[i] -= c << 21;
}

/// Replaces limb `i` (weight `2^(21i)`) by its congruent spread over
/// limbs `i − 12 .. i − 6`.
#[inline(always)]
fn fold(s: &mut [i64; 24], i: usize) {
    for (j, coefficient) in FOLD.iter().enumerate() {
        s[i - 12 + j] += s[i] * coefficient;
    }
    s[i] = 0;
}

/// Reduces 24 limbs modulo ℓ and packs the result.
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for i in (18..24).rev() {
        fold(&mut s, i);
    }

    for i in (6..=16).step_by(2) {
        carry(&mut s, i);
    }
    for i in (7..=15).step_by(2) {
        carry(&mut s, i);
    }

    for i in (12..18).rev() {
        fold(&mut s, i);
    }

    for i in (0..=10).step_by(2) {
        carry(&mut s, i);
    }
    for i in (1..=11).step_by(2) {
        carry(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..12 {
        carry_floor(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    pack(&s)
}

/// Serialises limbs `0..12` into 32 little-endian bytes.
fn pack(s: &[i64; 24]) -> [u8; 32] {
    let mut output = [0u8; 32];
    let mut acc = 0u64;
    let mut bits = 0;
    let mut position = 0;

    for limb in &s[..12] {
        acc |= (*limb as u64) << bits;
        bits += 21;
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

/// Fast constant-time scalar operations for Ed25519.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519ScalarOps;

impl ScalarOps for Ed25519ScalarOps {
    /// Reduces a 512-bit little-endian integer modulo ℓ.
    fn reduce(&self, s: &[u8; 64]) -> [u8; 32] {
        reduce_limbs(load::<24>(s))
    }

    /// Computes `(a · b + c) mod ℓ`.
    ///
    /// The schoolbook product of the twelve-limb inputs fills limbs
    /// `0..23`; a rounding carry pass (even limbs, then odd) bounds them
    /// before the shared reduction.
    fn multiply_and_add(&self, a: &[u8; 32], b: &[u8; 32], c: &[u8; 32]) -> [u8; 32] {
        let a = load::<12>(a);
        let b = load::<12>(b);
        let c = load::<12>(c);

        let mut s = [0i64; 24];
        for (i, out) in s.iter_mut().take(23).enumerate() {
            let mut acc = if i < 12 { c[i] } else { 0 };
            for j in i.saturating_sub(11)..=i.min(11) {
                acc += a[j] * b[i - j];
            }
            *out = acc;
        }

        for i in (0..=22).step_by(2) {
            carry(&mut s, i);
        }
        for i in (1..=21).step_by(2) {
            carry(&mut s, i);
        }

        reduce_limbs(s)
    }
}
