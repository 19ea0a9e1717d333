//! Persistence port for the inventory transaction log.

use chrono::{DateTime, Utc};
use stockbook_shared::error::StoreResult;
use stockbook_shared::types::{InventoryItemId, InventoryTransactionId};

use super::types::InventoryTransaction;

/// Store operations for inventory transactions.
///
/// The active/inactive filters mirror the entry store: supersession deletes
/// active records only, leaving freshly staged replacements untouched, and
/// rollback deletes inactive records only.
#[allow(async_fn_in_trait)]
pub trait InventoryTransactionStore {
    /// Returns the item's active transactions ordered by log index.
    async fn find_active_by_item(
        &self,
        item: InventoryItemId,
    ) -> StoreResult<Vec<InventoryTransaction>>;

    /// Looks up a transaction by id, active or not.
    async fn find_transaction(
        &self,
        id: InventoryTransactionId,
    ) -> StoreResult<Option<InventoryTransaction>>;

    /// Inserts a new transaction.
    async fn insert_transaction(&self, transaction: InventoryTransaction) -> StoreResult<()>;

    /// Marks the transaction active.
    async fn activate_transaction(&self, id: InventoryTransactionId) -> StoreResult<()>;

    /// Deletes inactive transactions anchored at the id: the transaction
    /// itself and those whose lineage pointer references it. Rollback path.
    async fn delete_inactive_transactions_for(
        &self,
        anchor: InventoryTransactionId,
    ) -> StoreResult<u64>;

    /// Deletes active transactions of the item at or after the log index.
    async fn delete_active_transactions_from_index(
        &self,
        item: InventoryItemId,
        from_index: usize,
    ) -> StoreResult<u64>;

    /// Deletes inactive transactions created strictly before the cutoff.
    async fn delete_inactive_transactions_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<u64>;
}
