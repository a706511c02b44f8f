//! Diagnostic view of registry slots.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one registry slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    /// No definition and no key.
    Empty,
    /// A definition is recorded but has not been parsed yet.
    Defined,
    /// The key was parsed from the slot's definition and is cached.
    Materialized,
    /// The key was installed directly and has no definition behind it.
    Pinned,
}

impl SlotState {
    /// Returns true if the slot currently holds a parsed or pinned key.
    pub fn holds_key(&self) -> bool {
        matches!(self, SlotState::Materialized | SlotState::Pinned)
    }
}

impl std::fmt::Display for SlotState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SlotState::Empty => "empty",
            SlotState::Defined => "defined",
            SlotState::Materialized => "materialized",
            SlotState::Pinned => "pinned",
        };
        f.write_str(name)
    }
}

/// Snapshot of one registry slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    /// Slot index
    pub index: usize,
    /// Slot state at snapshot time
    pub state: SlotState,
    /// Generation timestamp (0 if undefined)
    pub generated_time: i64,
    /// Fingerprint of the cached key, if any
    pub fingerprint: Option<String>,
}
