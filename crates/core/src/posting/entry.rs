//! Derived financial entry domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{
    FinancialAccountId, FinancialEntryId, FinancialUnitId, InventoryItemId,
    InventoryTransactionId,
};

/// A double-entry ledger record derived from an inventory transaction.
///
/// Increment and decrement transactions post one entry; a sale posts a
/// cost-of-goods entry plus a revenue entry on the sale accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    /// Unique identifier.
    pub id: FinancialEntryId,
    /// Financial unit the entry belongs to.
    pub financial_unit: FinancialUnitId,
    /// Inventory item whose transaction produced the entry.
    pub inventory_item: InventoryItemId,
    /// The inventory transaction this entry posts for.
    pub inventory_transaction: InventoryTransactionId,
    /// Lineage pointer to the transaction whose insertion forced this
    /// entry's regeneration, if any. Never an ownership relationship.
    pub inventory_transaction_forcing_derivation: Option<InventoryTransactionId>,
    /// Log index of the owning transaction within its item's log.
    pub inventory_item_transaction_index: usize,
    /// Account debited.
    pub debit_account: FinancialAccountId,
    /// Account credited.
    pub credit_account: FinancialAccountId,
    /// Posted amount, rounded to 2 decimal places.
    pub amount: Decimal,
    /// Date the entry takes effect.
    pub effective_date: NaiveDate,
    /// False until the surrounding operation activates the entry.
    pub is_active: bool,
    /// Creation instant, used by the stale-record sweep.
    pub created: DateTime<Utc>,
}
