use std::fmt;

use super::SIGNATURE_LENGTH;
use crate::error::Error;
use crate::math::ct::ConstantTimeEq;

/// An Ed25519 signature: the encoded point `R` followed by the scalar `S`.
#[derive(Clone, Copy)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        bytes
            .try_into()
            .map(Signature)
            .map_err(|_| Error::InvalidSignatureLength {
                expected: SIGNATURE_LENGTH,
                actual: bytes.len(),
            })
    }

    pub(crate) fn from_parts(r: &[u8; 32], s: &[u8; 32]) -> Self {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(r);
        bytes[32..].copy_from_slice(s);
        Signature(bytes)
    }

    /// The encoded commitment `R`.
    pub fn r_bytes(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The response scalar `S`.
    pub fn s_bytes(&self) -> &[u8] {
        &self.0[32..]
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}
