use std::fmt;
use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::{PublicKey, SEED_HASH_LENGTH, SEED_LENGTH, clamp};
use crate::error::Error;
use crate::math::ct::ConstantTimeEq;
use crate::math::field::{Fe25519, FieldElement};
use crate::params::ParameterSpec;

/// An Ed25519 private key in expanded form.
///
/// Keeps the seed (when known), the clamped seed hash `H(seed)` and the
/// secret scalar `a`, all wiped on drop, alongside the derived public key.
#[derive(Clone)]
pub struct PrivateKey<F: FieldElement = Fe25519> {
    seed: Option<Zeroizing<[u8; SEED_LENGTH]>>,
    hash: Zeroizing<[u8; SEED_HASH_LENGTH]>,
    scalar: Zeroizing<[u8; 32]>,
    public: PublicKey<F>,
}

impl<F: FieldElement> PrivateKey<F> {
    /// Expands a `b / 8`-byte seed.
    pub fn from_seed(seed: &[u8], params: Arc<ParameterSpec<F>>) -> Result<Self, Error> {
        let expected = params.encoded_length();
        let invalid = || Error::InvalidSeedLength {
            expected,
            actual: seed.len(),
        };
        if seed.len() != expected {
            return Err(invalid());
        }
        let seed = Zeroizing::new(<[u8; SEED_LENGTH]>::try_from(seed).map_err(|_| invalid())?);

        let mut digest = params.hash_algorithm().digest();
        digest.update(&seed[..]);
        let hash = Zeroizing::new(digest.finalize_reset().into_vec());

        Self::expand(Some(seed), &hash, params)
    }

    /// Builds a key directly from a `b / 4`-byte seed hash.
    ///
    /// The resulting key has no seed.
    pub fn from_hash(hash: &[u8], params: Arc<ParameterSpec<F>>) -> Result<Self, Error> {
        let expected = params.signature_length();
        if hash.len() != expected {
            return Err(Error::InvalidHashLength {
                expected,
                actual: hash.len(),
            });
        }

        Self::expand(None, hash, params)
    }

    /// Draws a fresh seed from `rng`.
    pub fn generate<R>(rng: &mut R, params: Arc<ParameterSpec<F>>) -> Result<Self, Error>
    where
        R: RngCore + CryptoRng,
    {
        let mut seed = Zeroizing::new([0u8; SEED_LENGTH]);
        rng.fill_bytes(&mut seed[..]);
        Self::from_seed(&seed[..], params)
    }

    fn expand(
        seed: Option<Zeroizing<[u8; SEED_LENGTH]>>,
        hash: &[u8],
        params: Arc<ParameterSpec<F>>,
    ) -> Result<Self, Error> {
        let mut expanded = Zeroizing::new([0u8; SEED_HASH_LENGTH]);
        if hash.len() != SEED_HASH_LENGTH {
            return Err(Error::InvalidHashLength {
                expected: SEED_HASH_LENGTH,
                actual: hash.len(),
            });
        }
        expanded.copy_from_slice(hash);

        let mut scalar = Zeroizing::new([0u8; 32]);
        scalar.copy_from_slice(&expanded[..32]);
        clamp(&mut scalar);
        expanded[..32].copy_from_slice(&scalar[..]);

        let point = params.base_point().scalar_multiply(&scalar);
        let public = PublicKey::from_point(point, params)?;

        Ok(Self {
            seed,
            hash: expanded,
            scalar,
            public,
        })
    }

    /// The seed, unless the key was built from its hash.
    pub fn seed(&self) -> Option<&[u8; SEED_LENGTH]> {
        self.seed.as_deref()
    }

    /// `H(seed)` with the low half clamped.
    pub fn hash_of_seed(&self) -> &[u8; SEED_HASH_LENGTH] {
        &self.hash
    }

    /// The secret scalar `a`.
    pub fn scalar(&self) -> &[u8; 32] {
        &self.scalar
    }

    /// The nonce key, the high half of `H(seed)`.
    pub fn prefix(&self) -> &[u8] {
        &self.hash[32..]
    }

    pub fn public_key(&self) -> &PublicKey<F> {
        &self.public
    }

    pub fn params(&self) -> &Arc<ParameterSpec<F>> {
        self.public.params()
    }
}

impl<F: FieldElement> PartialEq for PrivateKey<F> {
    fn eq(&self, other: &Self) -> bool {
        self.hash.ct_eq(&other.hash)
    }
}

impl<F: FieldElement> Eq for PrivateKey<F> {}

impl<F: FieldElement> fmt::Debug for PrivateKey<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}
