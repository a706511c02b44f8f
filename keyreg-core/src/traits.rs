//! Common traits for KEYREG.
//!
//! These traits define the seams between the registry and the services it
//! calls, so alternative implementations can be injected in tests.

use crate::error::Result;
use crate::types::VerificationKey;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY PARSING TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Converts raw encoded key bytes into a verification key.
///
/// The registry calls this lazily, at most once per key definition. A failure
/// is reported to the registry, which degrades the affected slot instead of
/// propagating the error to its caller.
pub trait KeyParser: Send + Sync {
    /// Parses one encoded public key.
    fn parse(&self, encoded: &[u8]) -> Result<VerificationKey>;
}

impl<F> KeyParser for F
where
    F: Fn(&[u8]) -> Result<VerificationKey> + Send + Sync,
{
    fn parse(&self, encoded: &[u8]) -> Result<VerificationKey> {
        self(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KeyRegError;

    #[test]
    fn test_closure_parser() {
        let parser = |bytes: &[u8]| -> Result<VerificationKey> {
            Err(KeyRegError::KeyParse(format!("{} bytes", bytes.len())))
        };
        let err = KeyParser::parse(&parser, b"abc").unwrap_err();
        assert!(err.to_string().contains("3 bytes"));
    }
}
