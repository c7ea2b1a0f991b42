//! Arithmetic core: the prime field, the curve group and scalars mod ℓ.

pub(crate) mod ct;
pub mod curve;
pub mod field;
pub mod fixed;
pub mod group;
pub mod scalar;

pub use ct::ConstantTimeEq;
pub use curve::Curve;
pub use field::{BigFieldElement, Fe25519, FieldElement, FiniteField};
pub use fixed::FixedPoint;
pub use group::{GroupElement, Representation};
pub use scalar::{BigScalarOps, Ed25519ScalarOps, ScalarOps};
