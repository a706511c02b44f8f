//! SPKI PEM codec for verification keys.
//!
//! Compiled key tables embed keys as the text of a `PUBLIC KEY` PEM
//! document. Tables emitted for C consumers may carry a trailing NUL
//! terminator inside the recorded length; it is ignored here.
//!
//! ## References
//!
//! - RFC 7468: Textual encodings of PKIX structures
//! - RFC 5480: Elliptic curve subject public key information

use k256::ecdsa::VerifyingKey;
use k256::pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding};
use tracing::trace;

use keyreg_core::constants::PUBLIC_KEY_PEM_BEGIN;
use keyreg_core::error::{KeyRegError, Result};
use keyreg_core::traits::KeyParser;
use keyreg_core::types::VerificationKey;

// ═══════════════════════════════════════════════════════════════════════════════
// DECODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses an SPKI PEM document into a verification key.
///
/// # Errors
///
/// - [`KeyRegError::KeyParse`] if the bytes are not UTF-8 text or the document
///   does not hold a valid secp256k1 public key
/// - [`KeyRegError::InvalidEncoding`] if the text does not contain a
///   `PUBLIC KEY` document
pub fn parse_public_key_pem(encoded: &[u8]) -> Result<VerificationKey> {
    let end = encoded
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    let text = std::str::from_utf8(&encoded[..end])
        .map_err(|e| KeyRegError::KeyParse(format!("key is not UTF-8 text: {e}")))?;

    if !text.trim_start().starts_with(PUBLIC_KEY_PEM_BEGIN) {
        return Err(KeyRegError::InvalidEncoding(
            "missing PUBLIC KEY boundary".into(),
        ));
    }

    let key = VerifyingKey::from_public_key_pem(text)
        .map_err(|e| KeyRegError::KeyParse(e.to_string()))?;

    trace!(len = encoded.len(), "Decoded PEM public key");
    Ok(VerificationKey::new(key))
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENCODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Encodes a verification key as an SPKI PEM document with `\n` line endings.
pub fn encode_public_key_pem(key: &VerificationKey) -> Result<String> {
    key.verifying_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyRegError::KeyEncode(e.to_string()))
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSER SERVICE
// ═══════════════════════════════════════════════════════════════════════════════

/// Default key-parsing service: SPKI PEM, secp256k1.
#[derive(Clone, Copy, Debug, Default)]
pub struct PemKeyParser;

impl KeyParser for PemKeyParser {
    fn parse(&self, encoded: &[u8]) -> Result<VerificationKey> {
        parse_public_key_pem(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;
    use proptest::prelude::*;
    use test_case::test_case;

    fn test_key(seed: u8) -> VerificationKey {
        let signing = SigningKey::from_slice(&[seed; 32]).unwrap();
        VerificationKey::new(*signing.verifying_key())
    }

    #[test]
    fn test_pem_roundtrip() {
        let key = test_key(9);
        let pem = encode_public_key_pem(&key).unwrap();
        assert!(pem.starts_with(PUBLIC_KEY_PEM_BEGIN));

        let parsed = parse_public_key_pem(pem.as_bytes()).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_trailing_nul_ignored() {
        let key = test_key(4);
        let mut bytes = encode_public_key_pem(&key).unwrap().into_bytes();
        bytes.push(0);

        let parsed = PemKeyParser.parse(&bytes).unwrap();
        assert_eq!(parsed.fingerprint(), key.fingerprint());
    }

    #[test_case(b"" ; "empty")]
    #[test_case(b"not a key" ; "plain text")]
    #[test_case(b"-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n" ; "wrong label")]
    fn test_rejects_non_public_key_text(bytes: &[u8]) {
        let result = parse_public_key_pem(bytes);
        assert!(matches!(result, Err(KeyRegError::InvalidEncoding(_))));
    }

    #[test]
    fn test_rejects_non_utf8() {
        let result = parse_public_key_pem(&[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(KeyRegError::KeyParse(_))));
    }

    #[test]
    fn test_rejects_corrupt_body() {
        let pem = "-----BEGIN PUBLIC KEY-----\nAAAAAAAA\n-----END PUBLIC KEY-----\n";
        let result = parse_public_key_pem(pem.as_bytes());
        assert!(matches!(result, Err(KeyRegError::KeyParse(_))));
    }

    proptest! {
        #[test]
        fn prop_arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = parse_public_key_pem(&bytes);
        }
    }
}
