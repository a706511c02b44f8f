//! Compiled-in key definitions.

use chrono::{DateTime, Utc};

use crate::constants::UNDEFINED_GENERATED_TIME;

/// An immutable public key record baked into the executable.
///
/// Tables of definitions live in static memory; the registry only ever keeps
/// a reference to a definition and compares definitions by address, never by
/// content.
#[derive(Debug)]
pub struct KeyDefinition {
    data: Option<&'static [u8]>,
    generated_time: i64,
}

impl KeyDefinition {
    /// Placeholder entry for an index with no compiled key.
    pub const EMPTY: KeyDefinition = KeyDefinition {
        data: None,
        generated_time: UNDEFINED_GENERATED_TIME,
    };

    /// Creates a definition from encoded key bytes and the time (seconds since
    /// the Unix epoch) the key was generated.
    pub const fn new(data: &'static [u8], generated_time: i64) -> Self {
        Self {
            data: Some(data),
            generated_time,
        }
    }

    /// Returns the encoded key bytes, or `None` for an empty entry.
    pub fn data(&self) -> Option<&'static [u8]> {
        self.data
    }

    /// Returns the length of the encoded key in bytes.
    pub fn len(&self) -> usize {
        self.data.map_or(0, <[u8]>::len)
    }

    /// Returns true if this entry carries no key data.
    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }

    /// Returns the baked-in generation timestamp.
    pub fn generated_time(&self) -> i64 {
        self.generated_time
    }
}

/// Formats a generation timestamp for display.
///
/// Returns `"-"` for the undefined timestamp and for values outside the
/// representable range.
pub fn format_generated_time(generated_time: i64) -> String {
    if generated_time == UNDEFINED_GENERATED_TIME {
        return "-".into();
    }
    DateTime::<Utc>::from_timestamp(generated_time, 0)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".into())
}
