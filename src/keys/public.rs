use std::fmt;
use std::sync::Arc;

use super::PUBLIC_KEY_LENGTH;
use crate::error::Error;
use crate::math::field::{Fe25519, FieldElement};
use crate::math::fixed::FixedPoint;
use crate::math::group::GroupElement;
use crate::params::ParameterSpec;

/// An Ed25519 public key.
///
/// Holds the canonical encoding of `A`, the decoded point, and `−A` with
/// its own lazily built odd-multiple table for verification.
#[derive(Clone)]
pub struct PublicKey<F: FieldElement = Fe25519> {
    bytes: [u8; PUBLIC_KEY_LENGTH],
    point: GroupElement<F>,
    negated: FixedPoint<F>,
    params: Arc<ParameterSpec<F>>,
}

impl<F: FieldElement> PublicKey<F> {
    /// Decodes and validates an encoded public key.
    pub fn from_bytes(bytes: &[u8], params: Arc<ParameterSpec<F>>) -> Result<Self, Error> {
        let expected = params.encoded_length();
        if bytes.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: bytes.len(),
            });
        }

        let point = params.curve().decode_point(bytes)?;
        Self::from_point(point, params)
    }

    /// Wraps a point given in P2, P3 or P1P1.
    ///
    /// Points that do not satisfy the curve equation are rejected with
    /// [`Error::InvalidPoint`].
    pub fn from_point(point: GroupElement<F>, params: Arc<ParameterSpec<F>>) -> Result<Self, Error> {
        if !point.is_on_curve(params.curve()) {
            return Err(Error::InvalidPoint);
        }
        let point = FixedPoint::new(Arc::clone(params.curve()), point)?;
        let negated = point.negate();

        Ok(Self {
            bytes: point.to_bytes(),
            point: point.point().clone(),
            negated,
            params,
        })
    }

    /// The canonical encoding of `A`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.bytes
    }

    /// `A` in P3.
    #[inline]
    pub fn point(&self) -> &GroupElement<F> {
        &self.point
    }

    /// `−A`, the operand of the verification equation.
    #[inline]
    pub fn negated(&self) -> &FixedPoint<F> {
        &self.negated
    }

    #[inline]
    pub fn params(&self) -> &Arc<ParameterSpec<F>> {
        &self.params
    }
}

impl<F: FieldElement> PartialEq for PublicKey<F> {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl<F: FieldElement> Eq for PublicKey<F> {}

impl<F: FieldElement> fmt::Debug for PublicKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in self.bytes {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
