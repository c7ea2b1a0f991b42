//! Constant-time comparison utilities.
//!
//! Table lookups during fixed-base scalar multiplication must not branch on
//! the secret digit, and comparisons of encoded values must not exit early.
//! Everything in here reduces to bitwise arithmetic on the inputs.

/// Constant-time equality and sign extraction.
///
/// Implementations must not introduce data-dependent branches or early
/// exits.
pub trait ConstantTimeEq {
    /// Returns `true` if `self == other`, in constant time.
    fn ct_eq(&self, other: &Self) -> bool;

    /// Returns `1` if the value is negative and `0` otherwise.
    ///
    /// Only meaningful for signed types; unsigned implementors return `0`.
    fn ct_neg(&self) -> u8 {
        0
    }
}

impl ConstantTimeEq for i8 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        eq_mask(*self as u8, *other as u8) == 1
    }

    #[inline(always)]
    fn ct_neg(&self) -> u8 {
        ((*self as i64 as u64) >> 63) as u8
    }
}

impl ConstantTimeEq for [u8] {
    /// Lengths are public; only the contents are compared in constant time.
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter()
            .zip(other)
            .map(|(a, b)| a ^ b)
            .fold(0, |acc, v| acc | v)
            == 0
    }
}

impl<const N: usize> ConstantTimeEq for [u8; N] {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> bool {
        self[..].ct_eq(&other[..])
    }
}

/// Returns `1` when `a == b`, `0` otherwise, without branching.
#[inline(always)]
pub(crate) fn eq_mask(a: u8, b: u8) -> u8 {
    (((a ^ b) as u32).wrapping_sub(1) >> 31) as u8
}

/// Compares two little-endian integers of equal length.
///
/// Returns `true` when `a < b`. The scan always touches every byte.
pub(crate) fn lt_le(a: &[u8], b: &[u8]) -> bool {
    debug_assert_eq!(a.len(), b.len());

    // Walk from the most significant byte; the first differing byte decides.
    let mut decided = 0u8;
    let mut less = 0u8;
    for (&x, &y) in a.iter().zip(b).rev() {
        let lt = ((x as i16 - y as i16) >> 8) as u8 & 1;
        let ne = 1 ^ eq_mask(x, y);
        less |= lt & !decided & 1;
        decided |= ne;
    }

    less == 1
}
