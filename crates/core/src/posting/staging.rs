//! Two-phase staging of derived financial entries.
//!
//! Entries are created invisible, validated against the unit's periods and
//! accounts, and flipped active only once the whole surrounding ledger
//! operation has succeeded; on failure the inactive records are discarded.
//! Invisibility until activation is the correctness mechanism.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use stockbook_shared::types::{
    round_amount, FinancialAccountId, FinancialEntryId, InventoryItemId, InventoryTransactionId,
};

use super::entry::FinancialEntry;
use super::error::PostingError;
use super::store::{FinancialEntryStore, ReferenceLookup};
use crate::inventory::types::{InventoryTransaction, TransactionPayload};
use rust_decimal::Decimal;

/// Stateless service implementing the inactive/active staging protocol.
pub struct EntryStaging;

impl EntryStaging {
    /// Validates referential preconditions and writes the transaction's
    /// entries inactive.
    ///
    /// Increment and decrement transactions post a single cost entry on the
    /// transaction's accounts; a sale additionally posts a revenue entry of
    /// `quantity * price_per_unit` on the sale accounts.
    pub async fn stage_inactive<S, R>(
        store: &S,
        lookup: &R,
        transaction: &InventoryTransaction,
    ) -> Result<Vec<FinancialEntry>, PostingError>
    where
        S: FinancialEntryStore,
        R: ReferenceLookup,
    {
        if !lookup
            .period_exists(transaction.financial_unit, transaction.effective_date)
            .await?
        {
            return Err(PostingError::PeriodNotFound {
                financial_unit: transaction.financial_unit,
                date: transaction.effective_date,
            });
        }
        Self::require_account(lookup, transaction, transaction.debit_account).await?;
        Self::require_account(lookup, transaction, transaction.credit_account).await?;

        let mut entries = vec![Self::entry_for(
            transaction,
            transaction.debit_account,
            transaction.credit_account,
            transaction.total_transaction_amount,
        )];
        if let TransactionPayload::Sale {
            quantity,
            price_per_unit,
            sale_debit_account,
            sale_credit_account,
        } = &transaction.payload
        {
            Self::require_account(lookup, transaction, *sale_debit_account).await?;
            Self::require_account(lookup, transaction, *sale_credit_account).await?;
            entries.push(Self::entry_for(
                transaction,
                *sale_debit_account,
                *sale_credit_account,
                round_amount(*quantity * *price_per_unit),
            ));
        }

        for entry in &entries {
            store.insert_entry(entry.clone()).await?;
        }
        debug!(
            transaction = %transaction.id,
            count = entries.len(),
            "staged inactive financial entries"
        );
        Ok(entries)
    }

    /// Activates every entry created for the transaction, including cascade
    /// entries pointing at it through the lineage pointer. Idempotent:
    /// already-active entries are left as they are.
    pub async fn activate<S: FinancialEntryStore>(
        store: &S,
        transaction: InventoryTransactionId,
    ) -> Result<u64, PostingError> {
        let activated = store.activate_entries_for(transaction).await?;
        debug!(%transaction, activated, "activated financial entries");
        Ok(activated)
    }

    /// Deletes the inactive entries created for the transaction, directly
    /// or through its lineage pointer. Rollback path.
    pub async fn discard_inactive<S: FinancialEntryStore>(
        store: &S,
        transaction: InventoryTransactionId,
    ) -> Result<u64, PostingError> {
        let discarded = store.delete_inactive_entries_for(transaction).await?;
        debug!(%transaction, discarded, "discarded inactive financial entries");
        Ok(discarded)
    }

    /// Retires superseded active entries of the item at or after the index.
    ///
    /// Must run before the replacement chain is activated: the active-only
    /// filter is what keeps the freshly staged entries out of reach.
    pub async fn delete_active_from_index<S: FinancialEntryStore>(
        store: &S,
        item: InventoryItemId,
        from_index: usize,
    ) -> Result<u64, PostingError> {
        let deleted = store.delete_active_entries_from_index(item, from_index).await?;
        debug!(%item, from_index, deleted, "retired superseded financial entries");
        Ok(deleted)
    }

    /// Reclaims entries left inactive by abandoned attempts, deleting those
    /// created before the cutoff. Intended to run as a periodic sweep.
    pub async fn reclaim_stale_inactive<S: FinancialEntryStore>(
        store: &S,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, PostingError> {
        let reclaimed = store.delete_inactive_entries_created_before(cutoff).await?;
        if reclaimed > 0 {
            info!(reclaimed, %cutoff, "reclaimed stale inactive financial entries");
        }
        Ok(reclaimed)
    }

    async fn require_account<R: ReferenceLookup>(
        lookup: &R,
        transaction: &InventoryTransaction,
        account: FinancialAccountId,
    ) -> Result<(), PostingError> {
        if lookup
            .account_exists(account, transaction.financial_unit)
            .await?
        {
            Ok(())
        } else {
            Err(PostingError::AccountNotFound(account))
        }
    }

    fn entry_for(
        transaction: &InventoryTransaction,
        debit_account: FinancialAccountId,
        credit_account: FinancialAccountId,
        amount: Decimal,
    ) -> FinancialEntry {
        FinancialEntry {
            id: FinancialEntryId::new(),
            financial_unit: transaction.financial_unit,
            inventory_item: transaction.inventory_item,
            inventory_transaction: transaction.id,
            inventory_transaction_forcing_derivation: transaction.transaction_forcing_derivation,
            inventory_item_transaction_index: transaction.transaction_index,
            debit_account,
            credit_account,
            amount,
            effective_date: transaction.effective_date,
            is_active: false,
            created: transaction.created,
        }
    }
}
