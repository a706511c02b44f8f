//! The process-wide key registry.

use std::sync::OnceLock;

use tracing::debug;

use keyreg_crypto::PemKeyParser;

use crate::registry::KeyRegistry;

static GLOBAL: OnceLock<KeyRegistry> = OnceLock::new();

/// Returns the process-wide registry, creating it on first call.
///
/// Construction happens exactly once even when several threads race here.
/// The registry lives until the process exits; it is never torn down.
pub fn global_instance() -> &'static KeyRegistry {
    GLOBAL.get_or_init(|| {
        debug!("Creating process-wide key registry");
        KeyRegistry::process_wide(PemKeyParser)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyreg_core::types::{SlotState, VerificationKey};

    #[test]
    fn test_global_instance_is_unique() {
        let ptrs: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| global_instance() as *const KeyRegistry as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(ptrs.iter().all(|&p| p == ptrs[0]));
        assert!(std::ptr::eq(global_instance(), KeyRegistry::global_instance()));
    }

    #[test]
    fn test_global_instance_keeps_state() {
        let key = k256::ecdsa::SigningKey::from_slice(&[0x5a; 32]).unwrap();
        // High index so other tests sharing the process-wide instance are unaffected.
        global_instance().set_key(1000, VerificationKey::new(*key.verifying_key()), 42);

        assert!(global_instance().count() > 1000);
        assert_eq!(global_instance().slot_state(1000), SlotState::Pinned);
        assert_eq!(global_instance().get_generated_time(1000), 42);
    }
}
