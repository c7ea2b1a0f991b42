//! Scalars modulo the group order ℓ.
//!
//! Scalars are plain 32-byte little-endian integers; there is no scalar
//! object. [`ScalarOps`] supplies the two operations the signature
//! equation needs, and this module adds the digit recodings consumed by
//! the scalar-multiplication algorithms.

mod limbs;
mod reference;

pub use limbs::Ed25519ScalarOps;
pub use reference::BigScalarOps;

use std::fmt::Debug;

use crate::math::ct;

/// Length in bytes of an encoded scalar.
pub const SCALAR_LENGTH: usize = 32;

/// `ℓ = 2^252 + 27742317777372353535851937790883648493`, little-endian.
pub const GROUP_ORDER: [u8; SCALAR_LENGTH] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// Arithmetic modulo ℓ.
///
/// Outputs are always the unique representative in `[0, ℓ)`.
pub trait ScalarOps: Debug + Send + Sync {
    /// `s mod ℓ` for a 512-bit little-endian `s`.
    fn reduce(&self, s: &[u8; 64]) -> [u8; SCALAR_LENGTH];

    /// `(a · b + c) mod ℓ`.
    fn multiply_and_add(
        &self,
        a: &[u8; SCALAR_LENGTH],
        b: &[u8; SCALAR_LENGTH],
        c: &[u8; SCALAR_LENGTH],
    ) -> [u8; SCALAR_LENGTH];
}

/// Returns `true` when `s < ℓ`.
pub fn is_canonical(s: &[u8; SCALAR_LENGTH]) -> bool {
    ct::lt_le(s, &GROUP_ORDER)
}

/// Radix-16 recoding with signed digits.
///
/// Produces 64 digits `e[i] ∈ [−8, 8)` (the last in `[−8, 8]`) with
/// `a = Σ e[i]·16^i`. Requires `a[31] ≤ 127`, which holds for reduced and
/// clamped scalars.
///
/// # Panics
///
/// Panics if bit 255 of `a` is set.
///
/// ## Constant-time
///
/// The carry is computed arithmetically; no branch depends on the digits.
pub fn to_radix16(a: &[u8; SCALAR_LENGTH]) -> [i8; 64] {
    assert!(a[31] <= 127, "radix-16 recoding needs a scalar below 2^255");

    let mut e = [0i8; 64];
    for (i, byte) in a.iter().enumerate() {
        e[2 * i] = (byte & 15) as i8;
        e[2 * i + 1] = ((byte >> 4) & 15) as i8;
    }

    let mut carry = 0i8;
    for digit in e.iter_mut().take(63) {
        *digit += carry;
        carry = (*digit + 8) >> 4;
        *digit -= carry << 4;
    }
    e[63] += carry;

    e
}

/// Sliding-window recoding into sparse odd digits.
///
/// Each of the 256 entries is zero or an odd value in `[−15, 15]`, and
/// `a = Σ r[i]·2^i`. Runs in variable time: only call on public scalars.
pub fn slide(a: &[u8; SCALAR_LENGTH]) -> [i8; 256] {
    let mut r: [i8; 256] = std::array::from_fn(|i| ((a[i >> 3] >> (i & 7)) & 1) as i8);

    for i in 0..256 {
        if r[i] == 0 {
            continue;
        }

        for b in 1..=6 {
            if i + b >= 256 {
                break;
            }
            if r[i + b] == 0 {
                continue;
            }

            let shifted = (r[i + b] as i32) << b;
            let current = r[i] as i32;

            if current + shifted <= 15 {
                r[i] = (current + shifted) as i8;
                r[i + b] = 0;
            } else if current - shifted >= -15 {
                r[i] = (current - shifted) as i8;
                // Propagate the borrowed bit upwards.
                for digit in r.iter_mut().skip(i + b) {
                    if *digit == 0 {
                        *digit = 1;
                        break;
                    }
                    *digit = 0;
                }
            } else {
                break;
            }
        }
    }

    r
}
