//! Constants shared across KEYREG crates.

// ═══════════════════════════════════════════════════════════════════════════════
// PEM ENCODING
// ═══════════════════════════════════════════════════════════════════════════════

/// Opening boundary of an SPKI public key PEM document.
pub const PUBLIC_KEY_PEM_BEGIN: &str = "-----BEGIN PUBLIC KEY-----";

// ═══════════════════════════════════════════════════════════════════════════════
// KEY SIZES
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of a compressed SEC1 secp256k1 point in bytes.
pub const SEC1_COMPRESSED_KEY_SIZE: usize = 33;

/// Number of digest bytes shown in a key fingerprint.
/// 8 bytes renders as 16 hex characters.
pub const FINGERPRINT_SIZE: usize = 8;

/// Highest slot index a key manifest may name.
/// Key tables are dense up to their highest index, so this bounds their size.
pub const MAX_KEY_INDEX: usize = 4095;

// ═══════════════════════════════════════════════════════════════════════════════
// TIMESTAMPS
// ═══════════════════════════════════════════════════════════════════════════════

/// Generation time reported for slots with no key.
pub const UNDEFINED_GENERATED_TIME: i64 = 0;
