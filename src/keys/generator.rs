use std::sync::Arc;

use rand::{CryptoRng, RngCore};
use tracing::debug;

use super::{PrivateKey, PublicKey};
use crate::error::Error;
use crate::math::field::{Fe25519, FieldElement};
use crate::params::{self, ParameterSpec};

/// Produces key pairs for one parameter set.
#[derive(Clone, Debug)]
pub struct KeyPairGenerator<F: FieldElement = Fe25519> {
    params: Arc<ParameterSpec<F>>,
}

impl KeyPairGenerator<Fe25519> {
    /// Bit strength used when none is requested.
    pub const DEFAULT_STRENGTH: usize = 256;

    /// A generator for the shared Ed25519 parameters.
    pub fn new() -> Result<Self, Error> {
        Self::with_strength(Self::DEFAULT_STRENGTH)
    }

    /// Selects parameters by key size in bits; only 256 is known.
    pub fn with_strength(bits: usize) -> Result<Self, Error> {
        match bits {
            256 => Ok(Self {
                params: params::ed25519()?,
            }),
            other => Err(Error::UnknownStrength(other)),
        }
    }
}

impl<F: FieldElement> KeyPairGenerator<F> {
    pub fn with_params(params: Arc<ParameterSpec<F>>) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Arc<ParameterSpec<F>> {
        &self.params
    }

    /// Draws a seed from `rng` and expands it.
    pub fn generate<R>(&self, rng: &mut R) -> Result<(PrivateKey<F>, PublicKey<F>), Error>
    where
        R: RngCore + CryptoRng,
    {
        let private = PrivateKey::generate(rng, Arc::clone(&self.params))?;
        let public = private.public_key().clone();
        debug!(public = ?public, "generated key pair");
        Ok((private, public))
    }
}
