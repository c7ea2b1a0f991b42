//! The EdDSA signing and verification state machine.
//!
//! An [`Engine`] is bound to one key at a time. Message bytes are fed with
//! [`Engine::update`] and the session is closed by [`Engine::sign`] or
//! [`Engine::verify`], after which the engine is ready for the next message
//! with the same key.
//!
//! ```text
//!   new ──init_sign/init_verify──▶ armed ──update──▶ accumulating
//!                                    ▲                    │
//!                                    └─────sign/verify────┘
//! ```
//!
//! ## One-shot mode
//!
//! After [`Engine::set_one_shot`] the message must arrive in a single
//! call. [`Engine::update_one_shot`] borrows the caller's buffer for the
//! rest of the session instead of copying it; a plain `update` is accepted
//! once and copied. A second update before the session is closed is
//! rejected, and the mode ends with that session.
//!
//! ## Signing (RFC 8032 §5.1.6)
//!
//! ```text
//! r = H(prefix ‖ M) mod ℓ,   R = r·B
//! h = H(R ‖ A ‖ M) mod ℓ,    S = (h·a + r) mod ℓ
//! ```
//!
//! ## Verification (RFC 8032 §5.1.7)
//!
//! The signature is accepted iff `S < ℓ` and `h·(−A) + S·B` encodes to
//! exactly `R`.

use std::fmt;

use sha2::digest::DynDigest;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::error::Error;
use crate::keys::{PrivateKey, PublicKey, Signature};
use crate::math::field::{Fe25519, FieldElement};
use crate::math::scalar::{self, SCALAR_LENGTH};
use crate::params::HashAlgorithm;

/// What an engine has been initialised for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Sign,
    Verify,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sign => f.write_str("signing"),
            Mode::Verify => f.write_str("verification"),
        }
    }
}

enum Key<F: FieldElement> {
    Signing(PrivateKey<F>),
    Verifying(PublicKey<F>),
}

impl<F: FieldElement> Key<F> {
    fn mode(&self) -> Mode {
        match self {
            Key::Signing(_) => Mode::Sign,
            Key::Verifying(_) => Mode::Verify,
        }
    }
}

/// A reusable sign/verify session.
///
/// Not meant to be shared between threads while in use; create one engine
/// per concurrent session.
pub struct Engine<'m, F: FieldElement = Fe25519> {
    required: Option<HashAlgorithm>,
    digest: Option<Box<dyn DynDigest + Send>>,
    key: Option<Key<F>>,
    buffer: Vec<u8>,
    one_shot: bool,
    fed: bool,
    borrowed: Option<&'m [u8]>,
}

impl<F: FieldElement> Default for Engine<'_, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'m, F: FieldElement> Engine<'m, F> {
    /// An engine that accepts keys of any hash algorithm.
    pub fn new() -> Self {
        Self {
            required: None,
            digest: None,
            key: None,
            buffer: Vec::new(),
            one_shot: false,
            fed: false,
            borrowed: None,
        }
    }

    /// An engine that only accepts keys declaring `algorithm`.
    pub fn with_digest(algorithm: HashAlgorithm) -> Self {
        Self {
            required: Some(algorithm),
            ..Self::new()
        }
    }

    /// The mode of the bound key, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.key.as_ref().map(Key::mode)
    }

    /// Whether the next `update` borrows instead of copying.
    pub fn is_one_shot(&self) -> bool {
        self.one_shot
    }

    fn bind_digest(&mut self, algorithm: HashAlgorithm) -> Result<(), Error> {
        if let Some(required) = self.required
            && required != algorithm
        {
            return Err(Error::DigestMismatch {
                engine: required,
                key: algorithm,
            });
        }
        self.digest = Some(algorithm.digest());
        Ok(())
    }

    /// Binds a signing key and pre-feeds the digest with its nonce prefix.
    pub fn init_sign(&mut self, key: &PrivateKey<F>) -> Result<(), Error> {
        self.clear_message();
        self.bind_digest(key.params().hash_algorithm())?;
        self.key = Some(Key::Signing(key.clone()));
        self.rearm();

        debug!(mode = %Mode::Sign, "engine initialized");
        Ok(())
    }

    /// Binds a verification key.
    pub fn init_verify(&mut self, key: &PublicKey<F>) -> Result<(), Error> {
        self.clear_message();
        self.bind_digest(key.params().hash_algorithm())?;
        self.key = Some(Key::Verifying(key.clone()));
        self.rearm();

        debug!(mode = %Mode::Verify, "engine initialized");
        Ok(())
    }

    /// Switches the current session to one-shot mode.
    ///
    /// Must be called before any message bytes are supplied.
    pub fn set_one_shot(&mut self) -> Result<(), Error> {
        if self.fed || !self.buffer.is_empty() {
            return Err(Error::OneShotAfterUpdate);
        }
        self.one_shot = true;
        Ok(())
    }

    /// Supplies message bytes by copying them into the internal buffer.
    ///
    /// In one-shot mode only a single call is accepted.
    pub fn update(&mut self, data: &[u8]) -> Result<(), Error> {
        self.check_feed()?;
        if self.one_shot {
            self.fed = true;
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    /// Supplies the whole message without copying it.
    ///
    /// Switches to one-shot mode if needed; `data` stays borrowed until the
    /// session is closed by `sign` or `verify`.
    pub fn update_one_shot(&mut self, data: &'m [u8]) -> Result<(), Error> {
        self.check_feed()?;
        if !self.one_shot {
            self.set_one_shot()?;
        }
        self.fed = true;
        self.borrowed = Some(data);
        Ok(())
    }

    fn check_feed(&self) -> Result<(), Error> {
        if self.key.is_none() {
            return Err(Error::NotInitialized);
        }
        if self.one_shot && self.fed {
            return Err(Error::OneShotReentry);
        }
        Ok(())
    }

    /// Appends a single byte. Not available in one-shot mode.
    pub fn update_byte(&mut self, byte: u8) -> Result<(), Error> {
        if self.key.is_none() {
            return Err(Error::NotInitialized);
        }
        if self.one_shot {
            return Err(Error::OneShotByteUpdate);
        }
        self.buffer.push(byte);
        Ok(())
    }

    /// Signs the accumulated message and re-arms for the next one.
    pub fn sign(&mut self) -> Result<Signature, Error> {
        let key = match &self.key {
            Some(Key::Signing(key)) => key,
            Some(Key::Verifying(_)) => {
                return Err(Error::WrongMode {
                    expected: Mode::Sign,
                    actual: Mode::Verify,
                });
            }
            None => return Err(Error::NotInitialized),
        };
        let digest = self.digest.as_mut().ok_or(Error::NotInitialized)?;
        let message: &[u8] = match self.borrowed {
            Some(borrowed) => borrowed,
            None => &self.buffer,
        };

        trace!(message_len = message.len(), one_shot = self.one_shot, "signing");
        let result = sign_message(key, digest.as_mut(), message);

        self.reset();
        result
    }

    /// Verifies `signature` over the accumulated message.
    ///
    /// A signature of the wrong length is an error; any other failure is
    /// `Ok(false)`. The message state is cleared either way.
    pub fn verify(&mut self, signature: &[u8]) -> Result<bool, Error> {
        let key = match &self.key {
            Some(Key::Verifying(key)) => key,
            Some(Key::Signing(_)) => {
                return Err(Error::WrongMode {
                    expected: Mode::Verify,
                    actual: Mode::Sign,
                });
            }
            None => return Err(Error::NotInitialized),
        };

        let expected = key.params().signature_length();
        if signature.len() != expected {
            self.reset();
            return Err(Error::InvalidSignatureLength {
                expected,
                actual: signature.len(),
            });
        }

        let digest = self.digest.as_mut().ok_or(Error::NotInitialized)?;
        let message: &[u8] = match self.borrowed {
            Some(borrowed) => borrowed,
            None => &self.buffer,
        };

        trace!(message_len = message.len(), one_shot = self.one_shot, "verifying");
        let result = verify_message(key, digest.as_mut(), message, signature);

        self.reset();
        if let Ok(valid) = result {
            debug!(valid, "verification finished");
        }
        result
    }

    /// One-shot convenience: `update_one_shot(data)`, then `sign`.
    pub fn sign_one_shot(&mut self, data: &'m [u8]) -> Result<Signature, Error> {
        self.update_one_shot(data)?;
        self.sign()
    }

    /// One-shot convenience: `update_one_shot(data)`, then `verify`.
    pub fn verify_one_shot(&mut self, data: &'m [u8], signature: &[u8]) -> Result<bool, Error> {
        self.update_one_shot(data)?;
        self.verify(signature)
    }

    /// Drops the current message and leaves the key bound and armed.
    pub fn reset(&mut self) {
        self.clear_message();
        self.rearm();
    }

    fn clear_message(&mut self) {
        self.buffer.clear();
        self.one_shot = false;
        self.fed = false;
        self.borrowed = None;
    }

    /// Resets the digest; for signing, feeds the nonce prefix again.
    fn rearm(&mut self) {
        let Some(digest) = self.digest.as_mut() else {
            return;
        };
        digest.reset();
        if let Some(Key::Signing(key)) = &self.key {
            digest.update(key.prefix());
        }
    }
}

impl<F: FieldElement> fmt::Debug for Engine<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("required", &self.required)
            .field("mode", &self.mode())
            .field("one_shot", &self.one_shot)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

fn finalize_wide(digest: &mut dyn DynDigest) -> Result<Zeroizing<[u8; 64]>, Error> {
    let output = digest.finalize_reset();
    let mut wide = Zeroizing::new([0u8; 64]);
    if output.len() != wide.len() {
        return Err(Error::HashLengthMismatch {
            expected: wide.len(),
            actual: output.len(),
        });
    }
    wide.copy_from_slice(&output);
    Ok(wide)
}

fn sign_message<F: FieldElement>(
    key: &PrivateKey<F>,
    digest: &mut dyn DynDigest,
    message: &[u8],
) -> Result<Signature, Error> {
    let params = key.params();
    let ops = params.scalar_ops();

    // The digest already holds the prefix.
    digest.update(message);
    let r = Zeroizing::new(ops.reduce(&*finalize_wide(digest)?));

    let commitment = params.base_point().scalar_multiply(&r).to_bytes();

    digest.update(&commitment);
    digest.update(key.public_key().as_bytes());
    digest.update(message);
    let h = ops.reduce(&*finalize_wide(digest)?);

    let s = ops.multiply_and_add(&h, key.scalar(), &r);

    Ok(Signature::from_parts(&commitment, &s))
}

fn verify_message<F: FieldElement>(
    key: &PublicKey<F>,
    digest: &mut dyn DynDigest,
    message: &[u8],
    signature: &[u8],
) -> Result<bool, Error> {
    let params = key.params();
    let (r, s) = signature.split_at(SCALAR_LENGTH);
    let s: &[u8; SCALAR_LENGTH] = s.try_into().map_err(|_| Error::InvalidSignatureLength {
        expected: params.signature_length(),
        actual: signature.len(),
    })?;

    if !scalar::is_canonical(s) {
        return Ok(false);
    }

    digest.update(r);
    digest.update(key.as_bytes());
    digest.update(message);
    let h = params.scalar_ops().reduce(&*finalize_wide(digest)?);

    let check = params
        .base_point()
        .double_scalar_multiply_variable_time(key.negated(), &h, s)
        .to_bytes();

    Ok(check[..] == *r)
}
