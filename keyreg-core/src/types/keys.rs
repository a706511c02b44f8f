//! Verification key type for KEYREG.
//!
//! [`VerificationKey`] is the materialized form of a compiled key definition:
//! a secp256k1 ECDSA public key ready to check signatures. It is deliberately
//! not `Clone`, so a value has exactly one owner until it is handed to the
//! registry.

use k256::ecdsa::VerifyingKey;
use sha3::{Digest, Sha3_256};

use crate::constants::{FINGERPRINT_SIZE, SEC1_COMPRESSED_KEY_SIZE};
use crate::error::{KeyRegError, Result};

// ═══════════════════════════════════════════════════════════════════════════════
// VERIFICATION KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// A parsed public key used to verify signed configuration files.
#[derive(PartialEq, Eq)]
pub struct VerificationKey {
    inner: VerifyingKey,
}

impl VerificationKey {
    /// Wraps an already-parsed ECDSA verifying key.
    pub fn new(inner: VerifyingKey) -> Self {
        Self { inner }
    }

    /// Creates a verification key from a SEC1 encoded point.
    ///
    /// # Errors
    /// Returns error if the bytes are not a valid secp256k1 point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        VerifyingKey::from_sec1_bytes(bytes)
            .map(Self::new)
            .map_err(|e| KeyRegError::KeyParse(format!("invalid SEC1 point: {e}")))
    }

    /// Returns the underlying ECDSA verifying key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.inner
    }

    /// Returns the compressed SEC1 encoding of the key.
    pub fn to_sec1_compressed(&self) -> [u8; SEC1_COMPRESSED_KEY_SIZE] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; SEC1_COMPRESSED_KEY_SIZE];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Returns a short hex fingerprint (SHA3-256 of the compressed point).
    pub fn fingerprint(&self) -> String {
        let digest = Sha3_256::digest(self.to_sec1_compressed());
        hex::encode(&digest[..FINGERPRINT_SIZE])
    }
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VerificationKey({})", self.fingerprint())
    }
}
