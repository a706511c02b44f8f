//! # KEYREG Cryptography
//!
//! The key-parsing service used by the KEYREG registry.
//!
//! This crate provides:
//!
//! - **PEM**: SPKI `PUBLIC KEY` documents decoded into secp256k1 verification keys
//! - **Parser**: [`PemKeyParser`], the default [`KeyParser`](keyreg_core::KeyParser)
//!
//! ## Example
//!
//! ```rust,ignore
//! use keyreg_core::KeyParser;
//! use keyreg_crypto::PemKeyParser;
//!
//! let key = PemKeyParser.parse(pem_bytes)?;
//! println!("loaded key {}", key.fingerprint());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod pem;

pub use pem::{encode_public_key_pem, parse_public_key_pem, PemKeyParser};
