//! Points with precomputed multiples, and the two scalar multiplications.
//!
//! A [`FixedPoint`] wraps a P3 point together with two lazily built tables:
//!
//! - the comb table, 32 rows of 8 Precomp entries where row `i`, column `j`
//!   holds `(j + 1)·256^i·P`, used by the constant-time [`scalar_multiply`];
//! - the odd-multiple table `P, 3P, …, 15P`, used by the variable-time
//!   [`double_scalar_multiply_variable_time`].
//!
//! Both are flat boxed slices published through a [`OnceCell`], so the
//! first caller builds them and every later caller (on any thread) sees the
//! finished table.
//!
//! [`scalar_multiply`]: FixedPoint::scalar_multiply
//! [`double_scalar_multiply_variable_time`]: FixedPoint::double_scalar_multiply_variable_time

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::error::Error;
use crate::math::ct::{ConstantTimeEq, eq_mask};
use crate::math::curve::Curve;
use crate::math::field::{ENCODED_LENGTH, FieldElement};
use crate::math::group::{GroupElement, Representation};
use crate::math::scalar::{self, SCALAR_LENGTH};

/// Rows of the comb table, one per pair of radix-16 digits.
pub const COMB_ROWS: usize = 32;

/// Entries per comb row, and entries in the odd-multiple table.
pub const COMB_COLUMNS: usize = 8;

#[derive(Clone, Debug)]
pub struct FixedPoint<F: FieldElement> {
    curve: Arc<Curve<F>>,
    point: GroupElement<F>,
    comb: OnceCell<Box<[GroupElement<F>]>>,
    odd: OnceCell<Box<[GroupElement<F>]>>,
}

impl<F: FieldElement> FixedPoint<F> {
    /// Wraps a point, converting it to P3 first.
    pub fn new(curve: Arc<Curve<F>>, point: GroupElement<F>) -> Result<Self, Error> {
        let point = point.to_rep(&curve, Representation::P3)?;
        Ok(Self {
            curve,
            point,
            comb: OnceCell::new(),
            odd: OnceCell::new(),
        })
    }

    /// Decodes a point encoding on `curve`.
    pub fn from_bytes(curve: Arc<Curve<F>>, bytes: &[u8]) -> Result<Self, Error> {
        let point = curve.decode_point(bytes)?;
        Self::new(curve, point)
    }

    #[inline]
    pub fn point(&self) -> &GroupElement<F> {
        &self.point
    }

    #[inline]
    pub fn curve(&self) -> &Arc<Curve<F>> {
        &self.curve
    }

    pub fn to_bytes(&self) -> [u8; ENCODED_LENGTH] {
        self.point.to_bytes()
    }

    /// `−P`, computed as `0 − CACHED(P)`. The tables of the result are
    /// built on demand like any other fixed point.
    pub fn negate(&self) -> Self {
        Self {
            curve: Arc::clone(&self.curve),
            point: self.point.negate(&self.curve),
            comb: OnceCell::new(),
            odd: OnceCell::new(),
        }
    }

    /// The comb table, row-major: entry `(i, j)` sits at `i * 8 + j`.
    pub fn comb_table(&self) -> &[GroupElement<F>] {
        self.comb.get_or_init(|| {
            let curve = &*self.curve;
            let mut table = Vec::with_capacity(COMB_ROWS * COMB_COLUMNS);

            let mut row_base = self.point.clone();
            for _ in 0..COMB_ROWS {
                let row_cached = row_base.to_cached(curve);
                let mut multiple = row_base.clone();
                for _ in 0..COMB_COLUMNS {
                    table.push(multiple.to_precomp(curve));
                    multiple = multiple.add(&row_cached).to_p3();
                }

                // Next row starts at 256 times this one.
                for _ in 0..8 {
                    row_base = row_base.add(&row_base.to_cached(curve)).to_p3();
                }
            }

            debug!(entries = table.len(), "built comb table");
            table.into_boxed_slice()
        })
    }

    /// The odd multiples `(2k + 1)·P` for `k` in `0..8`.
    pub fn odd_multiples(&self) -> &[GroupElement<F>] {
        self.odd.get_or_init(|| {
            let curve = &*self.curve;
            let mut table = Vec::with_capacity(COMB_COLUMNS);

            let mut multiple = self.point.clone();
            for _ in 0..COMB_COLUMNS {
                table.push(multiple.to_precomp(curve));
                // B_{k+1} = P + (P + B_k)
                let partial = self.point.add(&multiple.to_cached(curve)).to_p3();
                multiple = self.point.add(&partial.to_cached(curve)).to_p3();
            }

            debug!(entries = table.len(), "built odd-multiple table");
            table.into_boxed_slice()
        })
    }

    /// Constant-time lookup of `digit · 256^row · P` for `digit ∈ [−8, 8]`.
    ///
    /// Walks every entry of the row with `cmov`; a negative digit selects
    /// the absolute value and then conditionally negates it.
    fn select(&self, row: usize, digit: i8) -> GroupElement<F> {
        let entries = &self.comb_table()[row * COMB_COLUMNS..(row + 1) * COMB_COLUMNS];

        let negative = digit.ct_neg();
        let magnitude = (digit - ((-(negative as i8) & digit) << 1)) as u8;

        let mut t = self.curve.neutral(Representation::Precomp).clone();
        for (j, entry) in entries.iter().enumerate() {
            t = t.cmov(entry, eq_mask(magnitude, (j + 1) as u8));
        }

        let negated = t.precomp_negated();
        t.cmov(&negated, negative)
    }

    /// Constant-time `a · P` returned in P3.
    ///
    /// The radix-16 digits at odd positions are accumulated first,
    /// multiplied by 16 with four doublings, then the even positions are
    /// added.
    ///
    /// # Panics
    ///
    /// Panics if `a[31] > 127`. Reduced and clamped scalars never are.
    pub fn scalar_multiply(&self, a: &[u8; SCALAR_LENGTH]) -> GroupElement<F> {
        let e = scalar::to_radix16(a);

        let mut h = self.curve.neutral(Representation::P3).clone();
        for i in (1..64).step_by(2) {
            h = h.madd(&self.select(i / 2, e[i])).to_p3();
        }

        let mut s = h.dbl().to_p2();
        s = s.dbl().to_p2();
        s = s.dbl().to_p2();
        h = s.dbl().to_p3();

        for i in (0..64).step_by(2) {
            h = h.madd(&self.select(i / 2, e[i])).to_p3();
        }

        h
    }

    /// `a · A + b · P` returned in P2, where `P` is `self`.
    ///
    /// Variable time: the sliding-window digits steer both branches and
    /// table indices. Only use with public operands.
    pub fn double_scalar_multiply_variable_time(
        &self,
        a_point: &FixedPoint<F>,
        a: &[u8; SCALAR_LENGTH],
        b: &[u8; SCALAR_LENGTH],
    ) -> GroupElement<F> {
        let a_slide = scalar::slide(a);
        let b_slide = scalar::slide(b);
        let a_table = a_point.odd_multiples();
        let b_table = self.odd_multiples();

        let mut r = self.curve.neutral(Representation::P2).clone();

        let Some(top) = (0..256).rev().find(|&i| a_slide[i] != 0 || b_slide[i] != 0) else {
            return r;
        };

        for i in (0..=top).rev() {
            let mut t = r.dbl();

            t = apply_digit(t, a_slide[i], a_table);
            t = apply_digit(t, b_slide[i], b_table);

            r = t.to_p2();
        }

        r
    }
}

fn apply_digit<F: FieldElement>(
    t: GroupElement<F>,
    digit: i8,
    table: &[GroupElement<F>],
) -> GroupElement<F> {
    if digit > 0 {
        t.to_p3().madd(&table[(digit / 2) as usize])
    } else if digit < 0 {
        t.to_p3().msub(&table[((-digit) / 2) as usize])
    } else {
        t
    }
}
