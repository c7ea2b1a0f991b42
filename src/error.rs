//! Error type shared by every fallible operation of the crate.

use crate::engine::Mode;
use crate::math::Representation;
use crate::params::HashAlgorithm;

/// Errors surfaced by decoding, key construction and the signature engine.
///
/// Contract violations inside the arithmetic core (for example feeding a
/// `Cached` point to an operation that expects `P3`) are bugs, not inputs,
/// and panic instead of producing one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("encoding does not decode to a point on the curve")]
    InvalidPoint,
    #[error("unsupported conversion from {from} to {to}")]
    UnsupportedConversion {
        from: Representation,
        to: Representation,
    },
    #[error("unknown curve: {0}")]
    UnknownCurve(String),
    #[error("unsupported key strength: {0} bits")]
    UnknownStrength(usize),
    #[error("hash output of {actual} bytes does not match the required {expected} bytes")]
    HashLengthMismatch { expected: usize, actual: usize },
    #[error("key declares {key} but the engine is bound to {engine}")]
    DigestMismatch {
        engine: HashAlgorithm,
        key: HashAlgorithm,
    },
    #[error("invalid seed length: expected {expected} bytes, got {actual}")]
    InvalidSeedLength { expected: usize, actual: usize },
    #[error("invalid seed hash length: expected {expected} bytes, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength { expected: usize, actual: usize },
    #[error("engine has no key bound")]
    NotInitialized,
    #[error("engine is initialized for {actual}, not {expected}")]
    WrongMode { expected: Mode, actual: Mode },
    #[error("update() already called in one-shot mode")]
    OneShotReentry,
    #[error("one-shot mode must be enabled before the first update()")]
    OneShotAfterUpdate,
    #[error("single-byte updates are unsupported in one-shot mode")]
    OneShotByteUpdate,
}
