//! Ed25519 keys and signatures.
//!
//! Private keys are expanded from a 32-byte seed as in RFC 8032: the seed
//! is hashed, the low half of the digest is clamped into the secret scalar
//! `a`, and the high half keys the deterministic nonce. Public keys carry
//! the decoded point `A` and its negation, which verification consumes.

/// Key-pair generation from a caller-supplied RNG.
mod generator;

/// Secret signing keys.
mod private;

/// Public verification keys.
mod public;

/// The 64-byte `R ‖ S` signature value.
mod signature;

pub use generator::KeyPairGenerator;
pub use private::PrivateKey;
pub use public::PublicKey;
pub use signature::Signature;

/// Length of a private seed.
pub const SEED_LENGTH: usize = 32;

/// Length of an encoded public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of `H(seed)`.
pub const SEED_HASH_LENGTH: usize = 64;

/// Length of an encoded signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Clamps the low half of a seed hash into an Ed25519 secret scalar.
///
/// Clears the three low bits (a multiple of the cofactor), clears bit 255
/// and sets bit 254.
#[inline]
pub fn clamp(scalar: &mut [u8; 32]) {
    scalar[0] &= 248;
    scalar[31] &= 63;
    scalar[31] |= 64;
}
