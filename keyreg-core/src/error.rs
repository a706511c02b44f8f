//! Error types for KEYREG.
//!
//! This module provides the error hierarchy using `thiserror`.
//! Parse failures inside the registry accessor are absorbed and never surface
//! through it; these errors cover the fallible seams around it.

use thiserror::Error;

/// Result type alias using `KeyRegError`.
pub type Result<T> = std::result::Result<T, KeyRegError>;

/// Main error type for all KEYREG operations.
#[derive(Debug, Error)]
pub enum KeyRegError {
    // ═══════════════════════════════════════════════════════════════════════════
    // KEY MATERIAL ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Encoded key bytes could not be parsed into a verification key.
    #[error("Key parse failed: {0}")]
    KeyParse(String),

    /// Key material is not in the expected text encoding.
    #[error("Invalid key encoding: {0}")]
    InvalidEncoding(String),

    /// Verification key could not be re-encoded.
    #[error("Key encoding failed: {0}")]
    KeyEncode(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Slot index at or beyond the registry's key count.
    #[error("Key index {index} out of range (registry holds {count} slots)")]
    IndexOutOfRange {
        /// Requested slot index
        index: usize,
        /// Key count at the time of the request
        count: usize,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // MANIFEST ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Key manifest is malformed or inconsistent.
    #[error("Invalid key manifest: {0}")]
    Manifest(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl KeyRegError {
    /// Returns true if this error concerns key material.
    pub fn is_key_error(&self) -> bool {
        matches!(
            self,
            KeyRegError::KeyParse(_) | KeyRegError::InvalidEncoding(_) | KeyRegError::KeyEncode(_)
        )
    }

    /// Returns true if this error signals a caller bug rather than bad input.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, KeyRegError::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KeyRegError::IndexOutOfRange { index: 7, count: 3 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_error_classification() {
        assert!(KeyRegError::KeyParse("bad".into()).is_key_error());
        assert!(KeyRegError::InvalidEncoding("bad".into()).is_key_error());
        assert!(!KeyRegError::Manifest("bad".into()).is_key_error());

        assert!(KeyRegError::IndexOutOfRange { index: 1, count: 0 }.is_contract_violation());
        assert!(!KeyRegError::KeyParse("bad".into()).is_contract_violation());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_result: std::result::Result<serde_json::Value, _> = serde_json::from_str("invalid");
        let result: Result<serde_json::Value> = json_result.map_err(KeyRegError::from);
        assert!(matches!(result, Err(KeyRegError::JsonError(_))));
    }
}
