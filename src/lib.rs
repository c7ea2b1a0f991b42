//! Ed25519 signatures (RFC 8032)
//!
//! This crate implements the pure Ed25519 signature scheme over the twisted
//! Edwards curve `−x² + y² = 1 + d·x²·y²` with `p = 2²⁵⁵ − 19`, together with
//! the arithmetic it is built on.
//!
//! The focus is on **explicit semantics and inspectable internals**: every
//! layer, from field limbs to the signing state machine, is a public type
//! that can be exercised on its own.
//!
//! # Module overview
//!
//! - `math`
//!   The arithmetic core.
//!
//!   - `field`: the [`FieldElement`](math::FieldElement) capability, the
//!     ten-limb [`Fe25519`](math::Fe25519) backend and a big-integer
//!     reference backend used for cross-checking.
//!   - `group`: curve points in five coordinate systems (P2, P3, P1P1,
//!     Precomp, Cached) with the conversions and mixed additions between
//!     them, plus point encoding and decoding.
//!   - `fixed`: a point bundled with its precomputed tables, providing the
//!     constant-time fixed-base multiplication and the variable-time double
//!     scalar multiplication used by verification.
//!   - `scalar`: reduction of 512-bit values mod ℓ and `(a·b + c) mod ℓ`.
//!
//! - `params`
//!   Parameter sets binding a curve, a hash algorithm, the scalar backend
//!   and the base point, plus a case-insensitive table of named sets.
//!
//! - `keys`
//!   Private keys (seed, clamped seed hash, secret scalar), public keys
//!   (encoding, point and its negation), signatures and key generation.
//!
//! - `engine`
//!   The streaming sign/verify state machine, with an optional one-shot
//!   mode that borrows the message instead of buffering it.
//!
//! # Example
//!
//! ```
//! use eddsa::{Engine, PrivateKey, params};
//!
//! # fn main() -> Result<(), eddsa::Error> {
//! let params = params::ed25519()?;
//! let key = PrivateKey::from_seed(&[7u8; 32], params)?;
//!
//! let mut engine = Engine::new();
//! engine.init_sign(&key)?;
//! engine.update(b"hello")?;
//! let signature = engine.sign()?;
//!
//! let mut engine = Engine::new();
//! engine.init_verify(key.public_key())?;
//! assert!(engine.verify_one_shot(b"hello", signature.as_bytes())?);
//! # Ok(())
//! # }
//! ```
//!
//! # Security notes
//!
//! Signing uses constant-time table selection and conditional moves.
//! Verification is variable time, as it only handles public data. Secret
//! key material is wiped on drop.
//!
//! Pre-hashed (Ed25519ph) and contextual (Ed25519ctx) variants are not
//! provided.

pub mod engine;
pub mod error;
pub mod keys;
pub mod math;
pub mod params;

pub use engine::{Engine, Mode};
pub use error::Error;
pub use keys::{KeyPairGenerator, PrivateKey, PublicKey, Signature};
pub use params::{HashAlgorithm, NamedCurveTable, ParameterSpec};
