//! Persistence ports for derived financial entries.

use chrono::{DateTime, NaiveDate, Utc};
use stockbook_shared::error::StoreResult;
use stockbook_shared::types::{
    FinancialAccountId, FinancialUnitId, InventoryItemId, InventoryTransactionId,
};

use super::entry::FinancialEntry;

/// Store operations for financial entries.
///
/// Implementations must apply the active/inactive filters exactly as
/// documented: the staging protocol relies on them to distinguish
/// superseded records from their freshly staged replacements.
#[allow(async_fn_in_trait)]
pub trait FinancialEntryStore {
    /// Inserts a new entry.
    async fn insert_entry(&self, entry: FinancialEntry) -> StoreResult<()>;

    /// Flips `is_active` on every entry referencing the transaction
    /// directly or through its lineage pointer. Returns the number of
    /// entries newly activated.
    async fn activate_entries_for(
        &self,
        transaction: InventoryTransactionId,
    ) -> StoreResult<u64>;

    /// Deletes inactive entries referencing the transaction directly or
    /// through its lineage pointer. Returns the number deleted.
    async fn delete_inactive_entries_for(
        &self,
        transaction: InventoryTransactionId,
    ) -> StoreResult<u64>;

    /// Deletes active entries of the item at or after the given log index.
    async fn delete_active_entries_from_index(
        &self,
        item: InventoryItemId,
        from_index: usize,
    ) -> StoreResult<u64>;

    /// Deletes inactive entries created strictly before the cutoff.
    async fn delete_inactive_entries_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<u64>;

    /// Returns the item's entries ordered by log index.
    async fn find_entries_by_item(
        &self,
        item: InventoryItemId,
    ) -> StoreResult<Vec<FinancialEntry>>;
}

/// Referential lookups that must hold before entries may be staged.
#[allow(async_fn_in_trait)]
pub trait ReferenceLookup {
    /// True when a financial period covering the date exists in the unit.
    async fn period_exists(
        &self,
        financial_unit: FinancialUnitId,
        date: NaiveDate,
    ) -> StoreResult<bool>;

    /// True when the account exists and belongs to the unit.
    async fn account_exists(
        &self,
        account: FinancialAccountId,
        financial_unit: FinancialUnitId,
    ) -> StoreResult<bool>;
}
