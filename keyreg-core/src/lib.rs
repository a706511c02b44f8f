//! # KEYREG Core
//!
//! Core types, errors, and traits for the KEYREG signing-key registry.
//!
//! This crate provides the building blocks shared by the other KEYREG crates:
//!
//! - **Types**: Compiled key definitions and materialized verification keys
//! - **Errors**: A single error hierarchy with classification helpers
//! - **Constants**: PEM labels and encoding sizes
//! - **Traits**: The key-parsing seam used by the registry
//!
//! ## Example
//!
//! ```rust
//! use keyreg_core::KeyDefinition;
//!
//! static KEYS: [KeyDefinition; 2] = [
//!     KeyDefinition::EMPTY,
//!     KeyDefinition::new(b"-----BEGIN PUBLIC KEY-----\n...", 1_100_000_000),
//! ];
//!
//! assert!(KEYS[0].is_empty());
//! assert_eq!(KEYS[1].generated_time(), 1_100_000_000);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{KeyRegError, Result};
pub use traits::*;
pub use types::*;
