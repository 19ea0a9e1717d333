//! Per-item mutual exclusion for ledger mutations.
//!
//! A recomputation cascade reads the item's log and writes replacements in
//! several steps; two concurrent cascades on the same item would interleave
//! those reads and corrupt index contiguity. The engine documents
//! serialization as a caller-provided precondition, and this registry is
//! the mechanism the invoking layer uses to provide it.

use std::sync::Arc;

use dashmap::DashMap;
use stockbook_shared::types::InventoryItemId;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Hands out per-item async locks.
///
/// Guards are owned and may be held across await points for the duration of
/// a ledger call. Locks for different items never contend.
#[derive(Default)]
pub struct ItemLockRegistry {
    locks: DashMap<InventoryItemId, Arc<Mutex<()>>>,
}

impl ItemLockRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for an item, waiting until it is free.
    pub async fn acquire(&self, item: InventoryItemId) -> OwnedMutexGuard<()> {
        let lock = {
            let entry = self.locks.entry(item).or_default();
            Arc::clone(entry.value())
        };
        lock.lock_owned().await
    }
}
