//! Twisted Edwards curve `−x² + y² = 1 + d·x²·y²` over a [`FiniteField`].

use once_cell::sync::OnceCell;

use crate::error::Error;
use crate::math::field::{FieldElement, FiniteField};
use crate::math::group::{GroupElement, Representation};

/// Little-endian `q = 2²⁵⁵ − 19`.
pub const ED25519_Q: [u8; 32] = [
    0xed, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x7f,
];

/// Little-endian `d = −121665 / 121666`.
pub const ED25519_D: [u8; 32] = [
    0xa3, 0x78, 0x59, 0x13, 0xca, 0x4d, 0xeb, 0x75, 0xab, 0xd8, 0x41, 0x41, 0x4d, 0x0a, 0x70, 0x00,
    0x98, 0xe8, 0x79, 0x77, 0x79, 0x40, 0xc7, 0x8c, 0x73, 0xfe, 0x6f, 0x2b, 0xee, 0x6c, 0x03, 0x52,
];

/// Little-endian `i = √−1`.
pub const ED25519_I: [u8; 32] = [
    0xb0, 0xa0, 0x0e, 0x4a, 0x27, 0x1b, 0xee, 0xc4, 0x78, 0xe4, 0x2f, 0xad, 0x06, 0x18, 0x43, 0x2f,
    0xa7, 0xd7, 0xfb, 0x3d, 0x99, 0x00, 0x4d, 0x2b, 0x0b, 0xdf, 0xc1, 0x4f, 0x80, 0x24, 0x83, 0x2b,
];

/// Encoded base point: `y = 4/5`, positive `x`.
pub const ED25519_BASE: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
];

/// Curve parameters and the per-representation neutral elements.
///
/// Neutral elements are built on first request and then shared; the cell
/// guarantees concurrent first use observes one fully built value.
#[derive(Clone, Debug)]
pub struct Curve<F: FieldElement> {
    field: FiniteField<F>,
    d: F,
    d2: F,
    i: F,
    neutral: [OnceCell<GroupElement<F>>; 5],
}

impl<F: FieldElement> Curve<F> {
    /// Builds a curve from its field and the encodings of `d` and `i`.
    pub fn new(field: FiniteField<F>, d: &[u8], i: &[u8]) -> Result<Self, Error> {
        let d = field.decode(d)?;
        let i = field.decode(i)?;
        let d2 = d.add(&d);

        Ok(Self {
            field,
            d,
            d2,
            i,
            neutral: std::array::from_fn(|_| OnceCell::new()),
        })
    }

    /// The Ed25519 curve over the backend `F`.
    pub fn ed25519() -> Result<Self, Error> {
        let field = FiniteField::new(256, &ED25519_Q)?;
        Self::new(field, &ED25519_D, &ED25519_I)
    }

    #[inline]
    pub fn field(&self) -> &FiniteField<F> {
        &self.field
    }

    #[inline]
    pub fn d(&self) -> &F {
        &self.d
    }

    /// `2·d`, used by the cached and precomputed forms.
    #[inline]
    pub fn d2(&self) -> &F {
        &self.d2
    }

    /// The square root of −1.
    #[inline]
    pub fn i(&self) -> &F {
        &self.i
    }

    /// The neutral element `(0, 1)` in the requested representation.
    pub fn neutral(&self, repr: Representation) -> &GroupElement<F> {
        self.neutral[repr.index()].get_or_init(|| {
            let zero = self.field.zero().clone();
            let one = self.field.one().clone();
            match repr {
                Representation::P2 => GroupElement::p2(zero, one.clone(), one),
                Representation::P3 => GroupElement::p3(zero.clone(), one.clone(), one, zero),
                Representation::P1P1 => GroupElement::p1p1(zero, one.clone(), one.clone(), one),
                Representation::Precomp => GroupElement::precomp(one.clone(), one, zero),
                Representation::Cached => {
                    GroupElement::cached(one.clone(), one.clone(), one, zero)
                }
            }
        })
    }

    /// Decodes and validates a 32-byte point encoding.
    pub fn decode_point(&self, bytes: &[u8]) -> Result<GroupElement<F>, Error> {
        GroupElement::from_bytes(self, bytes)
    }
}
