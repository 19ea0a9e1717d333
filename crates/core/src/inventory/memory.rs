//! In-memory reference store.
//!
//! Implements every persistence port over `DashMap` collections. Used by
//! the test suites and suitable for small embeddings; clones share state.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;

use stockbook_shared::error::StoreResult;
use stockbook_shared::types::{
    FinancialAccountId, FinancialEntryId, FinancialPeriodId, FinancialUnitId, InventoryItemId,
    InventoryTransactionId,
};

use crate::fiscal::FinancialPeriod;
use crate::posting::entry::FinancialEntry;
use crate::posting::store::{FinancialEntryStore, ReferenceLookup};

use super::store::InventoryTransactionStore;
use super::types::InventoryTransaction;

/// DashMap-backed implementation of all persistence ports.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Collections>,
}

#[derive(Default)]
struct Collections {
    transactions: DashMap<InventoryTransactionId, InventoryTransaction>,
    entries: DashMap<FinancialEntryId, FinancialEntry>,
    periods: DashMap<FinancialPeriodId, FinancialPeriod>,
    accounts: DashMap<FinancialAccountId, FinancialUnitId>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a financial period.
    pub fn add_period(&self, period: FinancialPeriod) {
        self.inner.periods.insert(period.id, period);
    }

    /// Registers an account within a financial unit.
    pub fn add_account(&self, account: FinancialAccountId, financial_unit: FinancialUnitId) {
        self.inner.accounts.insert(account, financial_unit);
    }

    /// Snapshot of all transactions, ordered by id (creation order).
    #[must_use]
    pub fn transactions(&self) -> Vec<InventoryTransaction> {
        let mut all: Vec<InventoryTransaction> = self
            .inner
            .transactions
            .iter()
            .map(|record| record.value().clone())
            .collect();
        all.sort_by_key(|transaction| transaction.id.into_inner());
        all
    }

    /// Snapshot of all entries, ordered by id (creation order).
    #[must_use]
    pub fn entries(&self) -> Vec<FinancialEntry> {
        let mut all: Vec<FinancialEntry> = self
            .inner
            .entries
            .iter()
            .map(|record| record.value().clone())
            .collect();
        all.sort_by_key(|entry| entry.id.into_inner());
        all
    }

    fn remove_transactions_where(
        &self,
        predicate: impl Fn(&InventoryTransaction) -> bool,
    ) -> u64 {
        let doomed: Vec<InventoryTransactionId> = self
            .inner
            .transactions
            .iter()
            .filter(|record| predicate(record.value()))
            .map(|record| *record.key())
            .collect();
        for id in &doomed {
            self.inner.transactions.remove(id);
        }
        doomed.len() as u64
    }

    fn remove_entries_where(&self, predicate: impl Fn(&FinancialEntry) -> bool) -> u64 {
        let doomed: Vec<FinancialEntryId> = self
            .inner
            .entries
            .iter()
            .filter(|record| predicate(record.value()))
            .map(|record| *record.key())
            .collect();
        for id in &doomed {
            self.inner.entries.remove(id);
        }
        doomed.len() as u64
    }
}

impl InventoryTransactionStore for MemoryStore {
    async fn find_active_by_item(
        &self,
        item: InventoryItemId,
    ) -> StoreResult<Vec<InventoryTransaction>> {
        let mut log: Vec<InventoryTransaction> = self
            .inner
            .transactions
            .iter()
            .filter(|record| record.inventory_item == item && record.is_active)
            .map(|record| record.value().clone())
            .collect();
        log.sort_by_key(|transaction| transaction.transaction_index);
        Ok(log)
    }

    async fn find_transaction(
        &self,
        id: InventoryTransactionId,
    ) -> StoreResult<Option<InventoryTransaction>> {
        Ok(self
            .inner
            .transactions
            .get(&id)
            .map(|record| record.value().clone()))
    }

    async fn insert_transaction(&self, transaction: InventoryTransaction) -> StoreResult<()> {
        self.inner.transactions.insert(transaction.id, transaction);
        Ok(())
    }

    async fn activate_transaction(&self, id: InventoryTransactionId) -> StoreResult<()> {
        if let Some(mut record) = self.inner.transactions.get_mut(&id) {
            record.is_active = true;
        }
        Ok(())
    }

    async fn delete_inactive_transactions_for(
        &self,
        anchor: InventoryTransactionId,
    ) -> StoreResult<u64> {
        Ok(self.remove_transactions_where(|transaction| {
            !transaction.is_active
                && (transaction.id == anchor
                    || transaction.transaction_forcing_derivation == Some(anchor))
        }))
    }

    async fn delete_active_transactions_from_index(
        &self,
        item: InventoryItemId,
        from_index: usize,
    ) -> StoreResult<u64> {
        Ok(self.remove_transactions_where(|transaction| {
            transaction.inventory_item == item
                && transaction.is_active
                && transaction.transaction_index >= from_index
        }))
    }

    async fn delete_inactive_transactions_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<u64> {
        Ok(self.remove_transactions_where(|transaction| {
            !transaction.is_active && transaction.created < cutoff
        }))
    }
}

impl FinancialEntryStore for MemoryStore {
    async fn insert_entry(&self, entry: FinancialEntry) -> StoreResult<()> {
        self.inner.entries.insert(entry.id, entry);
        Ok(())
    }

    async fn activate_entries_for(
        &self,
        transaction: InventoryTransactionId,
    ) -> StoreResult<u64> {
        let mut activated = 0;
        for mut record in self.inner.entries.iter_mut() {
            let entry = record.value_mut();
            let references = entry.inventory_transaction == transaction
                || entry.inventory_transaction_forcing_derivation == Some(transaction);
            if references && !entry.is_active {
                entry.is_active = true;
                activated += 1;
            }
        }
        Ok(activated)
    }

    async fn delete_inactive_entries_for(
        &self,
        transaction: InventoryTransactionId,
    ) -> StoreResult<u64> {
        Ok(self.remove_entries_where(|entry| {
            !entry.is_active
                && (entry.inventory_transaction == transaction
                    || entry.inventory_transaction_forcing_derivation == Some(transaction))
        }))
    }

    async fn delete_active_entries_from_index(
        &self,
        item: InventoryItemId,
        from_index: usize,
    ) -> StoreResult<u64> {
        Ok(self.remove_entries_where(|entry| {
            entry.inventory_item == item
                && entry.is_active
                && entry.inventory_item_transaction_index >= from_index
        }))
    }

    async fn delete_inactive_entries_created_before(
        &self,
        cutoff: DateTime<Utc>,
    ) -> StoreResult<u64> {
        Ok(self.remove_entries_where(|entry| !entry.is_active && entry.created < cutoff))
    }

    async fn find_entries_by_item(
        &self,
        item: InventoryItemId,
    ) -> StoreResult<Vec<FinancialEntry>> {
        let mut entries: Vec<FinancialEntry> = self
            .inner
            .entries
            .iter()
            .filter(|record| record.inventory_item == item)
            .map(|record| record.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.inventory_item_transaction_index);
        Ok(entries)
    }
}

impl ReferenceLookup for MemoryStore {
    async fn period_exists(
        &self,
        financial_unit: FinancialUnitId,
        date: NaiveDate,
    ) -> StoreResult<bool> {
        Ok(self.inner.periods.iter().any(|record| {
            record.financial_unit == financial_unit && record.contains_date(date)
        }))
    }

    async fn account_exists(
        &self,
        account: FinancialAccountId,
        financial_unit: FinancialUnitId,
    ) -> StoreResult<bool> {
        Ok(self
            .inner
            .accounts
            .get(&account)
            .is_some_and(|unit| *unit == financial_unit))
    }
}
