//! Edwards25519 group elements.
//!
//! The curve is the twisted Edwards form
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²
//! ```
//!
//! and a point is held in one of five coordinate systems, each suited to a
//! different step of scalar multiplication:
//!
//! - **P2**: projective `(X : Y : Z)`, `x = X/Z`, `y = Y/Z`. Input to doubling.
//! - **P3**: extended `(X : Y : Z : T)` with `XY = ZT`. The working form.
//! - **P1P1**: completed `((X : Z), (Y : T))`. Output of every addition and
//!   doubling, converted to P2 or P3 before the next step.
//! - **Precomp**: `(y + x, y − x, 2d·x·y)` of a normalised affine point.
//!   Table entries for mixed addition.
//! - **Cached**: `(Y + X, Y − X, Z, 2d·T)` of a P3 point. Right-hand operand
//!   of projective addition.
//!
//! ## Conversions
//!
//! Only the conversions the algorithms need exist: P3 → P2, P3 → Cached,
//! P1P1 → P2 and P1P1 → P3, plus the identity. Anything else fails with
//! [`Error::UnsupportedConversion`] through [`GroupElement::to_rep`]; the
//! typed helpers (`to_p2`, `to_p3`, `to_cached`) and the addition laws
//! panic instead, since a wrong operand there is a bug in the caller.
//!
//! ## Formulas
//!
//! Addition and doubling follow Hisil, Wong, Carter and Dawson, "Twisted
//! Edwards curves revisited", with the operation counts of the Ed25519
//! reference implementation.

use std::fmt;

use crate::error::Error;
use crate::math::curve::Curve;
use crate::math::field::{ENCODED_LENGTH, FieldElement};

/// The coordinate system a [`GroupElement`] is expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Representation {
    P2,
    P3,
    P1P1,
    Precomp,
    Cached,
}

impl Representation {
    pub(crate) const fn index(self) -> usize {
        match self {
            Representation::P2 => 0,
            Representation::P3 => 1,
            Representation::P1P1 => 2,
            Representation::Precomp => 3,
            Representation::Cached => 4,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Representation::P2 => "P2",
            Representation::P3 => "P3",
            Representation::P1P1 => "P1P1",
            Representation::Precomp => "PRECOMP",
            Representation::Cached => "CACHED",
        };
        f.write_str(name)
    }
}

/// A point on the curve in one of the five representations.
#[derive(Clone, Debug)]
pub enum GroupElement<F> {
    P2 { x: F, y: F, z: F },
    P3 { x: F, y: F, z: F, t: F },
    P1P1 { x: F, y: F, z: F, t: F },
    Precomp { y_plus_x: F, y_minus_x: F, xy2d: F },
    Cached { y_plus_x: F, y_minus_x: F, z: F, t2d: F },
}

#[track_caller]
fn unsupported(operation: &str, repr: Representation) -> ! {
    panic!("{operation} is undefined for {repr} points")
}

impl<F: FieldElement> GroupElement<F> {
    pub fn p2(x: F, y: F, z: F) -> Self {
        GroupElement::P2 { x, y, z }
    }

    pub fn p3(x: F, y: F, z: F, t: F) -> Self {
        GroupElement::P3 { x, y, z, t }
    }

    pub fn p1p1(x: F, y: F, z: F, t: F) -> Self {
        GroupElement::P1P1 { x, y, z, t }
    }

    pub fn precomp(y_plus_x: F, y_minus_x: F, xy2d: F) -> Self {
        GroupElement::Precomp {
            y_plus_x,
            y_minus_x,
            xy2d,
        }
    }

    pub fn cached(y_plus_x: F, y_minus_x: F, z: F, t2d: F) -> Self {
        GroupElement::Cached {
            y_plus_x,
            y_minus_x,
            z,
            t2d,
        }
    }

    pub fn representation(&self) -> Representation {
        match self {
            GroupElement::P2 { .. } => Representation::P2,
            GroupElement::P3 { .. } => Representation::P3,
            GroupElement::P1P1 { .. } => Representation::P1P1,
            GroupElement::Precomp { .. } => Representation::Precomp,
            GroupElement::Cached { .. } => Representation::Cached,
        }
    }

    /// Decodes a point from `(sign(x), y)`.
    ///
    /// `x` is recovered as `u·v³·(u·v⁷)^((q−5)/8)` with `u = y² − 1` and
    /// `v = d·y² + 1`. If `v·x²` equals neither `u` nor `−u` the encoding
    /// names no curve point and is rejected. The result is P3 with `Z = 1`.
    pub fn from_bytes(curve: &Curve<F>, bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != ENCODED_LENGTH {
            return Err(Error::InvalidLength {
                expected: ENCODED_LENGTH,
                actual: bytes.len(),
            });
        }

        let y = curve.field().decode(bytes)?;
        let yy = y.square();

        let u = yy.subtract_one();
        let v = yy.multiply(curve.d()).add_one();

        let v3 = v.square().multiply(&v);
        let mut x = v3.square().multiply(&v).multiply(&u);
        x = x.pow22523();
        x = v3.multiply(&u).multiply(&x);

        let vxx = x.square().multiply(&v);
        if vxx.subtract(&u).is_non_zero() {
            if vxx.add(&u).is_non_zero() {
                return Err(Error::InvalidPoint);
            }
            x = x.multiply(curve.i());
        }

        let sign = (bytes[ENCODED_LENGTH - 1] >> 7) & 1 == 1;
        if x.is_negative() != sign {
            x = x.negate();
        }

        let t = x.multiply(&y);
        Ok(GroupElement::p3(x, y, F::one(), t))
    }

    /// Encodes the affine `y` with the sign of `x` in bit 255.
    ///
    /// Defined for P2, P3 and P1P1 points.
    pub fn to_bytes(&self) -> [u8; ENCODED_LENGTH] {
        match self {
            GroupElement::P2 { x, y, z } | GroupElement::P3 { x, y, z, .. } => {
                let recip = z.invert();
                let x = x.multiply(&recip);
                let y = y.multiply(&recip);
                let mut s = y.to_bytes();
                s[ENCODED_LENGTH - 1] |= (x.is_negative() as u8) << 7;
                s
            }
            GroupElement::P1P1 { .. } => self.to_p2().to_bytes(),
            other => unsupported("encoding", other.representation()),
        }
    }

    /// Converts to `repr`, failing for conversions that are not defined.
    pub fn to_rep(&self, curve: &Curve<F>, repr: Representation) -> Result<Self, Error> {
        let from = self.representation();
        if from == repr {
            return Ok(self.clone());
        }

        match (from, repr) {
            (Representation::P3, Representation::P2)
            | (Representation::P1P1, Representation::P2) => Ok(self.to_p2()),
            (Representation::P1P1, Representation::P3) => Ok(self.to_p3()),
            (Representation::P3, Representation::Cached) => Ok(self.to_cached(curve)),
            (from, to) => Err(Error::UnsupportedConversion { from, to }),
        }
    }

    /// P3 → P2 drops `T`; P1P1 → P2 costs three multiplications.
    pub fn to_p2(&self) -> Self {
        match self {
            GroupElement::P2 { .. } => self.clone(),
            GroupElement::P3 { x, y, z, .. } => GroupElement::p2(x.clone(), y.clone(), z.clone()),
            GroupElement::P1P1 { x, y, z, t } => {
                GroupElement::p2(x.multiply(t), y.multiply(z), z.multiply(t))
            }
            other => unsupported("conversion to P2", other.representation()),
        }
    }

    /// P1P1 → P3, four multiplications.
    pub fn to_p3(&self) -> Self {
        match self {
            GroupElement::P3 { .. } => self.clone(),
            GroupElement::P1P1 { x, y, z, t } => GroupElement::p3(
                x.multiply(t),
                y.multiply(z),
                z.multiply(t),
                x.multiply(y),
            ),
            other => unsupported("conversion to P3", other.representation()),
        }
    }

    /// P3 → Cached: `(Y + X, Y − X, Z, 2d·T)`.
    pub fn to_cached(&self, curve: &Curve<F>) -> Self {
        match self {
            GroupElement::Cached { .. } => self.clone(),
            GroupElement::P3 { x, y, z, t } => GroupElement::cached(
                y.add(x),
                y.subtract(x),
                z.clone(),
                t.multiply(curve.d2()),
            ),
            other => unsupported("conversion to CACHED", other.representation()),
        }
    }

    /// Normalises a P3 point to affine coordinates and stores it as a
    /// table entry. Costs one inversion.
    pub(crate) fn to_precomp(&self, curve: &Curve<F>) -> Self {
        match self {
            GroupElement::P3 { x, y, z, .. } => {
                let recip = z.invert();
                let x = x.multiply(&recip);
                let y = y.multiply(&recip);
                GroupElement::precomp(y.add(&x), y.subtract(&x), x.multiply(&y).multiply(curve.d2()))
            }
            other => unsupported("table normalisation", other.representation()),
        }
    }

    /// Doubles a P2 or P3 point into P1P1.
    ///
    /// ```text
    /// XX = X², YY = Y², B = 2Z², A = X + Y, AA = A²
    /// Yn = YY + XX, Zn = YY − XX
    /// → (AA − Yn, Yn, Zn, B − Zn)
    /// ```
    pub fn dbl(&self) -> Self {
        match self {
            GroupElement::P2 { x, y, z } | GroupElement::P3 { x, y, z, .. } => {
                let xx = x.square();
                let yy = y.square();
                let b = z.square_and_double();
                let aa = x.add(y).square();
                let yn = yy.add(&xx);
                let zn = yy.subtract(&xx);
                GroupElement::p1p1(aa.subtract(&yn), yn, zn.clone(), b.subtract(&zn))
            }
            other => unsupported("doubling", other.representation()),
        }
    }

    /// Mixed addition `self + q` with `self` in P3 and `q` in Precomp.
    pub fn madd(&self, q: &Self) -> Self {
        self.mixed(q, false)
    }

    /// Mixed subtraction `self − q` with `self` in P3 and `q` in Precomp.
    pub fn msub(&self, q: &Self) -> Self {
        self.mixed(q, true)
    }

    fn mixed(&self, q: &Self, subtract: bool) -> Self {
        let (x, y, z, t) = match self {
            GroupElement::P3 { x, y, z, t } => (x, y, z, t),
            other => unsupported("mixed addition", other.representation()),
        };
        let (q_plus, q_minus, q_xy2d) = match q {
            GroupElement::Precomp {
                y_plus_x,
                y_minus_x,
                xy2d,
            } => (y_plus_x, y_minus_x, xy2d),
            other => unsupported("mixed addition operand", other.representation()),
        };

        // Negating q swaps y + x with y − x and flips the sign of 2dxy.
        let (first, second) = if subtract {
            (q_minus, q_plus)
        } else {
            (q_plus, q_minus)
        };

        let a = y.add(x).multiply(first);
        let b = y.subtract(x).multiply(second);
        let c = q_xy2d.multiply(t);
        let d = z.add(z);

        let (zn, tn) = if subtract {
            (d.subtract(&c), d.add(&c))
        } else {
            (d.add(&c), d.subtract(&c))
        };

        GroupElement::p1p1(a.subtract(&b), a.add(&b), zn, tn)
    }

    /// Projective addition `self + q` with `self` in P3 and `q` in Cached.
    pub fn add(&self, q: &Self) -> Self {
        self.projective(q, false)
    }

    /// Projective subtraction `self − q` with `self` in P3 and `q` in Cached.
    pub fn sub(&self, q: &Self) -> Self {
        self.projective(q, true)
    }

    fn projective(&self, q: &Self, subtract: bool) -> Self {
        let (x, y, z, t) = match self {
            GroupElement::P3 { x, y, z, t } => (x, y, z, t),
            other => unsupported("addition", other.representation()),
        };
        let (q_plus, q_minus, q_z, q_t2d) = match q {
            GroupElement::Cached {
                y_plus_x,
                y_minus_x,
                z,
                t2d,
            } => (y_plus_x, y_minus_x, z, t2d),
            other => unsupported("addition operand", other.representation()),
        };

        let (first, second) = if subtract {
            (q_minus, q_plus)
        } else {
            (q_plus, q_minus)
        };

        let a = y.add(x).multiply(first);
        let b = y.subtract(x).multiply(second);
        let c = q_t2d.multiply(t);
        let zz = z.multiply(q_z);
        let d = zz.add(&zz);

        let (zn, tn) = if subtract {
            (d.subtract(&c), d.add(&c))
        } else {
            (d.add(&c), d.subtract(&c))
        };

        GroupElement::p1p1(a.subtract(&b), a.add(&b), zn, tn)
    }

    /// Negates a P3 point as `0 − CACHED(self)`.
    pub fn negate(&self, curve: &Curve<F>) -> Self {
        match self {
            GroupElement::P3 { .. } => curve
                .neutral(Representation::P3)
                .sub(&self.to_cached(curve))
                .to_p3(),
            other => unsupported("negation", other.representation()),
        }
    }

    /// Checks `−x² + y² = 1 + d·x²·y²` on the affine coordinates.
    pub fn is_on_curve(&self, curve: &Curve<F>) -> bool {
        match self {
            GroupElement::P2 { x, y, z } | GroupElement::P3 { x, y, z, .. } => {
                let recip = z.invert();
                let x = x.multiply(&recip);
                let y = y.multiply(&recip);
                let xx = x.square();
                let yy = y.square();
                let dxxyy = curve.d().multiply(&xx).multiply(&yy);
                curve.field().one().add(&dxxyy).add(&xx).ct_eq(&yy)
            }
            GroupElement::P1P1 { .. } => self.to_p2().is_on_curve(curve),
            other => unsupported("curve membership", other.representation()),
        }
    }

    /// Constant-time select between two table entries.
    ///
    /// Returns `other` when `bit == 1`, `self` when `bit == 0`.
    pub(crate) fn cmov(&self, other: &Self, bit: u8) -> Self {
        match (self, other) {
            (
                GroupElement::Precomp {
                    y_plus_x,
                    y_minus_x,
                    xy2d,
                },
                GroupElement::Precomp {
                    y_plus_x: other_plus,
                    y_minus_x: other_minus,
                    xy2d: other_xy2d,
                },
            ) => GroupElement::precomp(
                y_plus_x.cmov(other_plus, bit),
                y_minus_x.cmov(other_minus, bit),
                xy2d.cmov(other_xy2d, bit),
            ),
            (other, _) => unsupported("conditional move", other.representation()),
        }
    }

    /// The negation of a Precomp entry: `(y − x, y + x, −2dxy)`.
    pub(crate) fn precomp_negated(&self) -> Self {
        match self {
            GroupElement::Precomp {
                y_plus_x,
                y_minus_x,
                xy2d,
            } => GroupElement::precomp(y_minus_x.clone(), y_plus_x.clone(), xy2d.negate()),
            other => unsupported("table negation", other.representation()),
        }
    }

    /// Variable-time double-and-add over the bits of a little-endian
    /// scalar. Much slower than the table-driven multiplications; kept as
    /// the plain reference they are checked against.
    pub fn scalar_multiply_naive(&self, curve: &Curve<F>, scalar: &[u8]) -> Self {
        let cached = self.to_cached(curve);
        let mut acc = curve.neutral(Representation::P3).clone();
        for byte in scalar.iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.dbl().to_p3();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(&cached).to_p3();
                }
            }
        }
        acc
    }
}

fn projective_eq<F: FieldElement>(lhs: (&F, &F, &F), rhs: (&F, &F, &F)) -> bool {
    let (x1, y1, z1) = lhs;
    let (x2, y2, z2) = rhs;
    if z1.ct_eq(z2) {
        return x1.ct_eq(x2) && y1.ct_eq(y2);
    }
    x1.multiply(z2).ct_eq(&x2.multiply(z1)) && y1.multiply(z2).ct_eq(&y2.multiply(z1))
}

/// Points are equal when they name the same affine point.
///
/// P2, P3 and P1P1 compare through their projective `(X : Y : Z)`; Cached
/// points compare after cross-scaling by `Z`; Precomp points are already
/// normalised and compare coordinate-wise. Mixed Cached/Precomp or
/// table/working pairs are never equal.
impl<F: FieldElement> PartialEq for GroupElement<F> {
    fn eq(&self, other: &Self) -> bool {
        use GroupElement::*;

        match (self, other) {
            (P1P1 { .. }, _) => self.to_p2() == *other,
            (_, P1P1 { .. }) => *self == other.to_p2(),
            (P2 { x, y, z } | P3 { x, y, z, .. }, P2 { x: x2, y: y2, z: z2 })
            | (P2 { x, y, z } | P3 { x, y, z, .. }, P3 { x: x2, y: y2, z: z2, .. }) => {
                projective_eq((x, y, z), (x2, y2, z2))
            }
            (
                Precomp {
                    y_plus_x,
                    y_minus_x,
                    xy2d,
                },
                Precomp {
                    y_plus_x: p2,
                    y_minus_x: m2,
                    xy2d: d2,
                },
            ) => y_plus_x.ct_eq(p2) && y_minus_x.ct_eq(m2) && xy2d.ct_eq(d2),
            (
                Cached {
                    y_plus_x,
                    y_minus_x,
                    z,
                    t2d,
                },
                Cached {
                    y_plus_x: p2,
                    y_minus_x: m2,
                    z: z2,
                    t2d: t2,
                },
            ) => {
                if z.ct_eq(z2) {
                    return y_plus_x.ct_eq(p2) && y_minus_x.ct_eq(m2) && t2d.ct_eq(t2);
                }
                y_plus_x.multiply(z2).ct_eq(&p2.multiply(z))
                    && y_minus_x.multiply(z2).ct_eq(&m2.multiply(z))
                    && t2d.multiply(z2).ct_eq(&t2.multiply(z))
            }
            _ => false,
        }
    }
}
