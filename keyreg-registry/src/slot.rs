//! A single indexed cell of the key registry.

use std::sync::Arc;

use keyreg_core::constants::UNDEFINED_GENERATED_TIME;
use keyreg_core::types::{KeyDefinition, SlotInfo, SlotState, VerificationKey};

/// One registry slot.
///
/// `def` is `None` for pinned and never-populated slots. `key` is the cached
/// or pinned verification key; the slot holds the registry's only reference
/// to it, and callers receive clones of the `Arc`.
#[derive(Debug)]
pub(crate) struct KeySlot {
    pub(crate) def: Option<&'static KeyDefinition>,
    pub(crate) key: Option<Arc<VerificationKey>>,
    pub(crate) generated_time: i64,
}

impl Default for KeySlot {
    fn default() -> Self {
        Self {
            def: None,
            key: None,
            generated_time: UNDEFINED_GENERATED_TIME,
        }
    }
}

impl KeySlot {
    /// Returns true if `def` is the very record this slot already refers to.
    pub(crate) fn refers_to(&self, def: &'static KeyDefinition) -> bool {
        self.def.is_some_and(|current| std::ptr::eq(current, def))
    }

    /// Points the slot at a new definition, dropping any cached key.
    pub(crate) fn redefine(&mut self, def: &'static KeyDefinition) {
        self.key = None;
        self.def = Some(def);
        self.generated_time = def.generated_time();
    }

    /// Pins an explicit key, dropping any definition and previous key.
    pub(crate) fn pin(&mut self, key: VerificationKey, generated_time: i64) {
        self.def = None;
        self.key = Some(Arc::new(key));
        self.generated_time = generated_time;
    }

    /// Degrades the slot to fully empty after its definition failed to parse.
    pub(crate) fn degrade(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn state(&self) -> SlotState {
        match (&self.def, &self.key) {
            (None, None) => SlotState::Empty,
            (Some(_), None) => SlotState::Defined,
            (Some(_), Some(_)) => SlotState::Materialized,
            (None, Some(_)) => SlotState::Pinned,
        }
    }

    pub(crate) fn info(&self, index: usize) -> SlotInfo {
        SlotInfo {
            index,
            state: self.state(),
            generated_time: self.generated_time,
            fingerprint: self.key.as_ref().map(|key| key.fingerprint()),
        }
    }
}

/// Returns the slot at `index`, growing `slots` with empty slots as needed.
pub(crate) fn slot_mut(slots: &mut Vec<KeySlot>, index: usize) -> &mut KeySlot {
    if slots.len() <= index {
        slots.resize_with(index + 1, KeySlot::default);
    }
    &mut slots[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    static DEF_A: KeyDefinition = KeyDefinition::new(b"a", 10);
    static DEF_B: KeyDefinition = KeyDefinition::new(b"a", 20);

    #[test]
    fn test_default_slot_is_empty() {
        let slot = KeySlot::default();
        assert_eq!(slot.state(), SlotState::Empty);
        assert_eq!(slot.generated_time, 0);
    }

    #[test]
    fn test_refers_to_uses_identity() {
        let mut slot = KeySlot::default();
        slot.redefine(&DEF_A);
        assert!(slot.refers_to(&DEF_A));
        // Same bytes, different record.
        assert!(!slot.refers_to(&DEF_B));
        assert_eq!(slot.state(), SlotState::Defined);
        assert_eq!(slot.generated_time, 10);
    }

    #[test]
    fn test_growth_fills_holes() {
        let mut slots = Vec::new();
        slot_mut(&mut slots, 4).redefine(&DEF_A);
        assert_eq!(slots.len(), 5);
        assert!(slots[..4].iter().all(|s| s.state() == SlotState::Empty));

        // Touching a lower index never shrinks.
        slot_mut(&mut slots, 1);
        assert_eq!(slots.len(), 5);
    }

    #[test]
    fn test_degrade_clears_everything() {
        let mut slot = KeySlot::default();
        slot.redefine(&DEF_B);
        slot.degrade();
        assert_eq!(slot.state(), SlotState::Empty);
        assert_eq!(slot.generated_time, 0);
    }
}
