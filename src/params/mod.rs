//! Parameter sets: which curve, which base point, which hash.

mod named;

pub use named::{ED_25519, NamedCurveSpec, NamedCurveTable, ed25519};

use std::fmt;
use std::sync::Arc;

use sha2::digest::DynDigest;
use sha2::{Sha256, Sha384, Sha512};
use tracing::debug;

use crate::error::Error;
use crate::math::curve::{Curve, ED25519_BASE};
use crate::math::field::{Fe25519, FieldElement};
use crate::math::fixed::FixedPoint;
use crate::math::group::GroupElement;
use crate::math::scalar::{Ed25519ScalarOps, ScalarOps};

/// Digest families a parameter set may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    /// The conventional algorithm name, e.g. `"SHA-512"`.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Output length in bytes.
    pub const fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Looks an algorithm up by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        [
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ]
        .into_iter()
        .find(|algorithm| algorithm.name().eq_ignore_ascii_case(name))
    }

    /// A fresh digest instance.
    pub fn digest(self) -> Box<dyn DynDigest + Send> {
        match self {
            HashAlgorithm::Sha256 => Box::new(Sha256::default()),
            HashAlgorithm::Sha384 => Box::new(Sha384::default()),
            HashAlgorithm::Sha512 => Box::new(Sha512::default()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to derive keys, sign and verify.
///
/// The base point owns its precomputed tables, so sharing one
/// `ParameterSpec` (behind an `Arc`) shares the tables too.
#[derive(Clone, Debug)]
pub struct ParameterSpec<F: FieldElement = Fe25519> {
    curve: Arc<Curve<F>>,
    hash: HashAlgorithm,
    scalar_ops: Arc<dyn ScalarOps>,
    base: FixedPoint<F>,
}

impl<F: FieldElement> ParameterSpec<F> {
    /// Assembles a parameter set.
    ///
    /// The hash must produce exactly `b / 4` bytes: half keys the nonce,
    /// half becomes the secret scalar.
    pub fn new(
        curve: Arc<Curve<F>>,
        hash: HashAlgorithm,
        scalar_ops: Arc<dyn ScalarOps>,
        base: GroupElement<F>,
    ) -> Result<Self, Error> {
        let expected = curve.field().b() / 4;
        if hash.output_size() != expected {
            return Err(Error::HashLengthMismatch {
                expected,
                actual: hash.output_size(),
            });
        }

        let base = FixedPoint::new(Arc::clone(&curve), base)?;
        debug!(b = curve.field().b(), hash = %hash, "created parameter spec");

        Ok(Self {
            curve,
            hash,
            scalar_ops,
            base,
        })
    }

    /// Ed25519 over the backend `F`: SHA-512 and the standard base point.
    pub fn ed25519() -> Result<Self, Error> {
        let curve = Arc::new(Curve::ed25519()?);
        let base = curve.decode_point(&ED25519_BASE)?;
        Self::new(curve, HashAlgorithm::Sha512, Arc::new(Ed25519ScalarOps), base)
    }

    #[inline]
    pub fn curve(&self) -> &Arc<Curve<F>> {
        &self.curve
    }

    #[inline]
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.hash
    }

    #[inline]
    pub fn scalar_ops(&self) -> &dyn ScalarOps {
        &*self.scalar_ops
    }

    /// The base point `B` with its tables.
    #[inline]
    pub fn base_point(&self) -> &FixedPoint<F> {
        &self.base
    }

    /// Encoding bit width `b`.
    #[inline]
    pub fn b(&self) -> usize {
        self.curve.field().b()
    }

    /// `b / 8`: seeds, points and scalars.
    #[inline]
    pub fn encoded_length(&self) -> usize {
        self.b() / 8
    }

    /// `b / 4`: seed hashes and signatures.
    #[inline]
    pub fn signature_length(&self) -> usize {
        self.b() / 4
    }
}
