//! The per-item transaction ledger and its cascading recomputation engine.
//!
//! An item's log is an ordered, 0-indexed, contiguous sequence of active
//! transactions. Appending extends the tail; inserting at an earlier
//! position invalidates the cost basis of every later transaction, because
//! stock batches flow forward through the log, so the whole suffix is
//! replayed against the shifted stock state and superseded by derived
//! replacements. Records created during an attempt stay inactive until the
//! entire operation has succeeded; activation is the single point where
//! success becomes observable.
//!
//! The engine does not serialize concurrent mutations of the same item.
//! Callers must hold the item's lock (see
//! [`ItemLockRegistry`](super::lock::ItemLockRegistry)) for the duration of
//! each mutating call.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use stockbook_shared::types::{InventoryItemId, InventoryTransactionId};

use crate::posting::staging::EntryStaging;
use crate::posting::store::{FinancialEntryStore, ReferenceLookup};
use crate::stock::{self, Stock, StockBatch, StockMovement, StockValuationMethod};

use super::error::LedgerError;
use super::store::InventoryTransactionStore;
use super::types::{CreateTransactionInput, InventoryTransaction, TransactionPayload};

/// The transaction ledger bound to a persistence backend.
pub struct TransactionLedger<S> {
    store: S,
}

impl<S> TransactionLedger<S>
where
    S: InventoryTransactionStore + FinancialEntryStore + ReferenceLookup,
{
    /// Creates a ledger over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an inventory transaction, appending to the item's log or
    /// inserting retroactively at `insert_before_index`.
    ///
    /// A retroactive insert replays every transaction at or after the
    /// insertion position against the shifted stock state and supersedes it
    /// with a derived replacement. On any failure before the commit point
    /// the attempt is rolled back and the log is left untouched.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<InventoryTransaction, LedgerError> {
        validate_payload(&input.payload)?;

        let item = input.inventory_item;
        let log = self.store.find_active_by_item(item).await?;
        verify_contiguity(item, &log)?;

        let len = log.len();
        let position = input.insert_before_index.unwrap_or(len);
        if position > len {
            return Err(LedgerError::InsertIndexOutOfRange {
                index: position,
                len,
            });
        }

        let stock_before = match position {
            0 => Stock::empty(),
            p => log[p - 1].stock_after_transaction.clone(),
        };

        let created = Utc::now();
        let inserted = build_transaction(&input, position, stock_before, created)?;
        let anchor = inserted.id;

        if let Err(err) = self.persist_staged(&inserted).await {
            self.rollback(anchor).await;
            return Err(err);
        }

        let mut staged_ids = vec![anchor];
        let mut carry = inserted.stock_after_transaction.clone();
        for superseded in &log[position..] {
            let rebuilt = rebuild_derived(
                superseded,
                &carry,
                superseded.transaction_index + 1,
                anchor,
                created,
            );
            let replacement = match rebuilt {
                Ok(replacement) => replacement,
                Err(err) => {
                    self.rollback(anchor).await;
                    return Err(cascade_aborted(superseded.transaction_index, err));
                }
            };
            if let Err(err) = self.persist_staged(&replacement).await {
                self.rollback(anchor).await;
                return Err(cascade_aborted(superseded.transaction_index, err));
            }
            carry = replacement.stock_after_transaction.clone();
            staged_ids.push(replacement.id);
        }

        // Commit point. Retire the superseded records first: the
        // replacements are still inactive, so the active-only filters
        // cannot touch them. After this step only store failures remain,
        // and they surface without rollback.
        if position < len {
            EntryStaging::delete_active_from_index(&self.store, item, position).await?;
            self.store
                .delete_active_transactions_from_index(item, position)
                .await?;
        }
        EntryStaging::activate(&self.store, anchor).await?;
        for id in &staged_ids {
            self.store.activate_transaction(*id).await?;
        }

        debug!(
            %item,
            index = position,
            replayed = staged_ids.len() - 1,
            kind = %inserted.transaction_type(),
            "inventory transaction created"
        );
        let mut inserted = inserted;
        inserted.is_active = true;
        Ok(inserted)
    }

    /// Deletes a transaction, replaying every later transaction of the item
    /// one position down; the deleted transaction's id anchors the lineage
    /// of the replacements. Deleting the tail degenerates to plain
    /// retirement with no replay.
    pub async fn delete_transaction(
        &self,
        id: InventoryTransactionId,
    ) -> Result<(), LedgerError> {
        let transaction = self
            .store
            .find_transaction(id)
            .await?
            .filter(|t| t.is_active)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        let item = transaction.inventory_item;
        let log = self.store.find_active_by_item(item).await?;
        verify_contiguity(item, &log)?;

        let position = transaction.transaction_index;
        if log.get(position).is_none_or(|t| t.id != id) {
            error!(%item, index = position, "transaction missing from its active log position");
            return Err(LedgerError::IndexContiguityViolation(item));
        }
        let mut carry = match position {
            0 => Stock::empty(),
            p => log[p - 1].stock_after_transaction.clone(),
        };

        let created = Utc::now();
        let mut staged_ids = Vec::new();
        for superseded in &log[position + 1..] {
            let rebuilt = rebuild_derived(
                superseded,
                &carry,
                superseded.transaction_index - 1,
                id,
                created,
            );
            let replacement = match rebuilt {
                Ok(replacement) => replacement,
                Err(err) => {
                    self.rollback(id).await;
                    return Err(cascade_aborted(superseded.transaction_index, err));
                }
            };
            if let Err(err) = self.persist_staged(&replacement).await {
                self.rollback(id).await;
                return Err(cascade_aborted(superseded.transaction_index, err));
            }
            carry = replacement.stock_after_transaction.clone();
            staged_ids.push(replacement.id);
        }

        // Commit point: retire the deleted transaction together with the
        // superseded suffix, then activate the replacement chain.
        EntryStaging::delete_active_from_index(&self.store, item, position).await?;
        self.store
            .delete_active_transactions_from_index(item, position)
            .await?;
        EntryStaging::activate(&self.store, id).await?;
        for staged in &staged_ids {
            self.store.activate_transaction(*staged).await?;
        }

        debug!(
            %item,
            index = position,
            replayed = staged_ids.len(),
            "inventory transaction deleted"
        );
        Ok(())
    }

    /// Returns the stock state as of `date`: the after-snapshot of the
    /// highest-index active transaction effective on or before that date,
    /// or an empty stock when there is none.
    pub async fn stock_at_date(
        &self,
        item: InventoryItemId,
        date: NaiveDate,
    ) -> Result<Stock, LedgerError> {
        let log = self.store.find_active_by_item(item).await?;
        Ok(log
            .iter()
            .rev()
            .find(|transaction| transaction.effective_date <= date)
            .map_or_else(Stock::empty, |transaction| {
                transaction.stock_after_transaction.clone()
            }))
    }

    /// Reclaims records left inactive by abandoned attempts: entries and
    /// transactions created before the cutoff that never activated.
    /// Intended to run as a periodic sweep with a grace period chosen by
    /// the caller.
    pub async fn reclaim_stale_inactive(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<u64, LedgerError> {
        let entries = EntryStaging::reclaim_stale_inactive(&self.store, cutoff).await?;
        let transactions = self
            .store
            .delete_inactive_transactions_created_before(cutoff)
            .await?;
        Ok(entries + transactions)
    }

    /// Inserts the transaction record and stages its financial entries,
    /// all inactive.
    async fn persist_staged(&self, transaction: &InventoryTransaction) -> Result<(), LedgerError> {
        self.store.insert_transaction(transaction.clone()).await?;
        EntryStaging::stage_inactive(&self.store, &self.store, transaction).await?;
        Ok(())
    }

    /// Best-effort removal of every inactive record created during a failed
    /// attempt. Secondary failures are logged and never mask the original
    /// error.
    async fn rollback(&self, anchor: InventoryTransactionId) {
        if let Err(err) = EntryStaging::discard_inactive(&self.store, anchor).await {
            warn!(%anchor, error = %err, "rollback: failed to discard staged financial entries");
        }
        if let Err(err) = self.store.delete_inactive_transactions_for(anchor).await {
            warn!(%anchor, error = %err, "rollback: failed to discard staged inventory transactions");
        }
    }
}

/// Validates the movement amounts before any mutation.
fn validate_payload(payload: &TransactionPayload) -> Result<(), LedgerError> {
    if payload.quantity() <= Decimal::ZERO {
        return Err(LedgerError::NonPositiveQuantity);
    }
    match payload {
        TransactionPayload::Increment { cost_per_unit, .. }
            if *cost_per_unit < Decimal::ZERO =>
        {
            Err(LedgerError::NegativeUnitCost)
        }
        TransactionPayload::Sale { price_per_unit, .. }
            if *price_per_unit < Decimal::ZERO =>
        {
            Err(LedgerError::NegativeUnitPrice)
        }
        _ => Ok(()),
    }
}

/// Fails closed when the active log is not a dense 0-based index range.
fn verify_contiguity(
    item: InventoryItemId,
    log: &[InventoryTransaction],
) -> Result<(), LedgerError> {
    for (position, transaction) in log.iter().enumerate() {
        if transaction.transaction_index != position {
            error!(
                %item,
                expected = position,
                found = transaction.transaction_index,
                "active transaction log is not contiguous"
            );
            return Err(LedgerError::IndexContiguityViolation(item));
        }
    }
    Ok(())
}

/// Runs the mutation engine for a payload against the preceding stock.
fn apply_movement(
    payload: &TransactionPayload,
    stock_before: &Stock,
    index: usize,
    effective_date: NaiveDate,
    method: StockValuationMethod,
) -> Result<StockMovement, LedgerError> {
    let movement = match payload {
        TransactionPayload::Increment {
            quantity,
            cost_per_unit,
        } => stock::increment(
            stock_before,
            StockBatch {
                quantity: *quantity,
                cost_per_unit: *cost_per_unit,
                added: effective_date,
                transaction_index: index,
            },
        ),
        TransactionPayload::Decrement { quantity } | TransactionPayload::Sale { quantity, .. } => {
            stock::decrement(stock_before, *quantity, method)?
        }
    };
    Ok(movement)
}

/// Applies the movement to the preceding stock state and assembles the new
/// transaction record, still inactive.
fn build_transaction(
    input: &CreateTransactionInput,
    index: usize,
    stock_before: Stock,
    created: DateTime<Utc>,
) -> Result<InventoryTransaction, LedgerError> {
    let movement = apply_movement(
        &input.payload,
        &stock_before,
        index,
        input.effective_date,
        input.valuation_method,
    )?;
    Ok(InventoryTransaction {
        id: InventoryTransactionId::new(),
        financial_unit: input.financial_unit,
        inventory_item: input.inventory_item,
        description: input.description.clone(),
        effective_date: input.effective_date,
        payload: input.payload.clone(),
        total_transaction_amount: movement.change_cost,
        stock_before_transaction: stock_before,
        stock_after_transaction: movement.stock,
        valuation_method_applied: input.valuation_method,
        transaction_index: index,
        debit_account: input.debit_account,
        credit_account: input.credit_account,
        is_derived_transaction: false,
        transaction_forcing_derivation: None,
        is_active: false,
        created,
        creator: input.created_by,
    })
}

/// Rebuilds a superseded transaction at a shifted index against a new
/// preceding stock state, preserving its business content. The replacement
/// keeps the superseded transaction's frozen valuation method and accounts;
/// only the stock snapshots, amount, and index change.
fn rebuild_derived(
    superseded: &InventoryTransaction,
    stock_before: &Stock,
    index: usize,
    forcing: InventoryTransactionId,
    created: DateTime<Utc>,
) -> Result<InventoryTransaction, LedgerError> {
    let movement = apply_movement(
        &superseded.payload,
        stock_before,
        index,
        superseded.effective_date,
        superseded.valuation_method_applied,
    )?;
    Ok(InventoryTransaction {
        id: InventoryTransactionId::new(),
        financial_unit: superseded.financial_unit,
        inventory_item: superseded.inventory_item,
        description: superseded.description.clone(),
        effective_date: superseded.effective_date,
        payload: superseded.payload.clone(),
        total_transaction_amount: movement.change_cost,
        stock_before_transaction: stock_before.clone(),
        stock_after_transaction: movement.stock,
        valuation_method_applied: superseded.valuation_method_applied,
        transaction_index: index,
        debit_account: superseded.debit_account,
        credit_account: superseded.credit_account,
        is_derived_transaction: true,
        transaction_forcing_derivation: Some(forcing),
        is_active: false,
        created,
        creator: superseded.creator,
    })
}

fn cascade_aborted(index: usize, source: LedgerError) -> LedgerError {
    LedgerError::CascadeAborted {
        index,
        source: Box::new(source),
    }
}
