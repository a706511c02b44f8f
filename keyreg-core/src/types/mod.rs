//! Domain types for KEYREG.
//!
//! - [`KeyDefinition`]: Immutable compiled-in key record
//! - [`VerificationKey`]: Parsed, directly usable public key
//! - [`SlotState`] / [`SlotInfo`]: Diagnostic view of one registry slot

mod definition;
mod keys;
mod slot;

pub use definition::*;
pub use keys::*;
pub use slot::*;
