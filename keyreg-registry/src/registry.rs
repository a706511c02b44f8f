//! The signing-key registry.
//!
//! A sparse, growable table of key slots indexed from 0. Compiled-in key
//! definitions are parsed on first access and cached; explicitly installed
//! keys are pinned and never parsed.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::{debug, error, instrument, warn};

use keyreg_core::error::{KeyRegError, Result};
use keyreg_core::traits::KeyParser;
use keyreg_core::types::{KeyDefinition, SlotInfo, SlotState, VerificationKey};
use keyreg_crypto::PemKeyParser;

use crate::slot::{slot_mut, KeySlot};

/// Registry of public keys for signed configuration files.
///
/// # Indexing
///
/// [`count`](Self::count) is the highest index ever touched plus one. Indices
/// below it may still be empty; indices at or above it are a caller bug and
/// panic in [`get_key`](Self::get_key) and
/// [`get_generated_time`](Self::get_generated_time).
///
/// # Thread Safety
///
/// One lock guards both table growth and lazy key materialization, so no
/// reader observes a slot while the table is being resized.
pub struct KeyRegistry {
    slots: RwLock<Vec<KeySlot>>,
    parser: Box<dyn KeyParser>,
    /// Set only on the instance returned by [`crate::global_instance`].
    process_wide: bool,
}

impl KeyRegistry {
    /// Creates an empty registry that parses PEM public keys.
    pub fn new() -> Self {
        Self::with_parser(PemKeyParser)
    }

    /// Creates an empty registry with a custom key-parsing service.
    pub fn with_parser(parser: impl KeyParser + 'static) -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            parser: Box::new(parser),
            process_wide: false,
        }
    }

    pub(crate) fn process_wide(parser: impl KeyParser + 'static) -> Self {
        Self {
            slots: RwLock::new(Vec::new()),
            parser: Box::new(parser),
            process_wide: true,
        }
    }

    /// Returns the process-wide registry, creating it on first call.
    pub fn global_instance() -> &'static KeyRegistry {
        crate::global::global_instance()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // WRITES
    // ═══════════════════════════════════════════════════════════════════════════

    /// Records a table of compiled-in key definitions.
    ///
    /// Entry `i` targets slot `i`. Empty entries are skipped and leave the
    /// existing slot untouched, so several partial tables merge by index.
    /// Re-importing the same record is a no-op; a different record drops the
    /// slot's cached key, which is re-parsed on the next [`get_key`](Self::get_key).
    ///
    /// Returns the number of slots whose definition changed.
    #[instrument(skip_all, fields(entries = definitions.len()))]
    pub fn bulk_import(&self, definitions: &'static [KeyDefinition]) -> usize {
        let mut slots = self.slots.write();
        let mut changed = 0;

        for (index, def) in definitions.iter().enumerate() {
            if def.is_empty() {
                continue;
            }
            let slot = slot_mut(&mut slots, index);
            if slot.refers_to(def) {
                continue;
            }
            slot.redefine(def);
            changed += 1;
        }

        debug!(changed, count = slots.len(), "Imported key definitions");
        changed
    }

    /// Installs an already-parsed key at `index`, taking ownership of it.
    ///
    /// The slot becomes pinned: any definition is forgotten and any previous
    /// key is dropped.
    #[instrument(skip(self, key), fields(fingerprint = %key.fingerprint()))]
    pub fn set_key(&self, index: usize, key: VerificationKey, generated_time: i64) {
        let mut slots = self.slots.write();
        slot_mut(&mut slots, index).pin(key, generated_time);
        debug!(count = slots.len(), "Pinned key");
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // READS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the number of slots: the highest index touched plus one.
    ///
    /// This is an upper bound on valid indices, not the number of keys.
    pub fn count(&self) -> usize {
        self.slots.read().len()
    }

    /// Returns the key at `index`, or `None` if the slot has no usable key.
    ///
    /// A slot holding only a definition is parsed here and the key cached,
    /// so repeated calls return the same `Arc`. If parsing fails the slot is
    /// permanently emptied and `None` is returned; the failure is not retried.
    ///
    /// # Panics
    /// Panics if `index >= self.count()`.
    pub fn get_key(&self, index: usize) -> Option<Arc<VerificationKey>> {
        match self.lookup(index) {
            Lookup::Cached(key) => Some(key),
            Lookup::Empty => None,
            Lookup::Unparsed => self.materialize(index),
            Lookup::OutOfRange(count) => {
                panic!("key index {index} out of range (registry holds {count} slots)")
            }
        }
    }

    /// Like [`get_key`](Self::get_key), but reports an out-of-range index as
    /// an error instead of panicking.
    pub fn try_get_key(&self, index: usize) -> Result<Option<Arc<VerificationKey>>> {
        match self.lookup(index) {
            Lookup::Cached(key) => Ok(Some(key)),
            Lookup::Empty => Ok(None),
            Lookup::Unparsed => Ok(self.materialize(index)),
            Lookup::OutOfRange(count) => Err(KeyRegError::IndexOutOfRange { index, count }),
        }
    }

    /// Returns the generation time of the key at `index`, or 0 if undefined.
    ///
    /// # Panics
    /// Panics if `index >= self.count()`.
    pub fn get_generated_time(&self, index: usize) -> i64 {
        let slots = self.slots.read();
        assert!(
            index < slots.len(),
            "key index {index} out of range (registry holds {} slots)",
            slots.len()
        );
        slots[index].generated_time
    }

    /// Like [`get_generated_time`](Self::get_generated_time), but reports an
    /// out-of-range index as an error instead of panicking.
    pub fn try_get_generated_time(&self, index: usize) -> Result<i64> {
        let slots = self.slots.read();
        slots
            .get(index)
            .map(|slot| slot.generated_time)
            .ok_or(KeyRegError::IndexOutOfRange {
                index,
                count: slots.len(),
            })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DIAGNOSTICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns the lifecycle state of the slot at `index`.
    ///
    /// Indices beyond [`count`](Self::count) report [`SlotState::Empty`].
    pub fn slot_state(&self, index: usize) -> SlotState {
        self.slots
            .read()
            .get(index)
            .map_or(SlotState::Empty, KeySlot::state)
    }

    /// Returns a snapshot of every slot without parsing anything.
    pub fn snapshot(&self) -> Vec<SlotInfo> {
        self.slots
            .read()
            .iter()
            .enumerate()
            .map(|(index, slot)| slot.info(index))
            .collect()
    }

    /// Parses every slot that holds an unparsed definition.
    ///
    /// Returns the number of slots that hold a key afterwards.
    pub fn materialize_all(&self) -> usize {
        (0..self.count())
            .filter(|&index| self.get_key(index).is_some())
            .count()
    }

    /// Cache-hit path, served under a shared lock.
    fn lookup(&self, index: usize) -> Lookup {
        let slots = self.slots.read();
        match slots.get(index) {
            None => Lookup::OutOfRange(slots.len()),
            Some(KeySlot { key: Some(key), .. }) => Lookup::Cached(Arc::clone(key)),
            Some(KeySlot { def: Some(_), .. }) => Lookup::Unparsed,
            Some(_) => Lookup::Empty,
        }
    }

    /// Parses the slot's definition and caches the key.
    ///
    /// The slot is re-checked under the upgradable lock since another caller
    /// may have filled or degraded it after [`lookup`](Self::lookup). Slots
    /// never shrink, so `index` stays in range.
    fn materialize(&self, index: usize) -> Option<Arc<VerificationKey>> {
        let slots = self.slots.upgradable_read();
        let slot = &slots[index];
        if let Some(key) = &slot.key {
            return Some(Arc::clone(key));
        }
        let def = slot.def?;

        let mut slots = RwLockUpgradableReadGuard::upgrade(slots);
        let slot = &mut slots[index];
        match self.parser.parse(def.data().unwrap_or_default()) {
            Ok(key) => {
                let key = Arc::new(key);
                debug!(index, fingerprint = %key.fingerprint(), "Materialized key");
                slot.key = Some(Arc::clone(&key));
                Some(key)
            }
            Err(e) => {
                warn!(index, len = def.len(), error = %e, "Discarding unreadable key definition");
                slot.degrade();
                None
            }
        }
    }
}

/// Outcome of a shared-lock slot lookup.
enum Lookup {
    Cached(Arc<VerificationKey>),
    Unparsed,
    Empty,
    OutOfRange(usize),
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("count", &self.count())
            .field("process_wide", &self.process_wide)
            .finish_non_exhaustive()
    }
}

impl Drop for KeyRegistry {
    fn drop(&mut self) {
        if self.process_wide {
            error!("Internal error: process-wide key registry dropped");
        }
    }
}
