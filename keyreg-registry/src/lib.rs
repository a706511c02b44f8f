//! # KEYREG Registry
//!
//! The table of public keys used to verify signed configuration files.
//!
//! Keys enter the registry two ways:
//!
//! - **Compiled tables**: [`KeyRegistry::bulk_import`] records static
//!   [`KeyDefinition`](keyreg_core::KeyDefinition)s; each is parsed lazily on
//!   first [`KeyRegistry::get_key`]
//! - **Explicit keys**: [`KeyRegistry::set_key`] pins an already-parsed key
//!
//! ## Example
//!
//! ```rust,ignore
//! use keyreg_core::KeyDefinition;
//! use keyreg_registry::global_instance;
//!
//! static KEYS: [KeyDefinition; 1] = [KeyDefinition::new(PEM_A, 1_100_000_000)];
//!
//! let registry = global_instance();
//! registry.bulk_import(&KEYS);
//!
//! if let Some(key) = registry.get_key(0) {
//!     println!("key 0: {}", key.fingerprint());
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod global;
mod registry;
mod slot;

pub use global::global_instance;
pub use registry::KeyRegistry;
