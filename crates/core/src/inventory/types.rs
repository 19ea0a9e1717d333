//! Inventory transaction domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{
    FinancialAccountId, FinancialUnitId, InventoryItemId, InventoryTransactionId, UserId,
};

use crate::stock::{Stock, StockValuationMethod};

/// Kind of inventory movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InventoryTransactionType {
    /// Stock increase: a new priced batch enters stock.
    Increment,
    /// Stock decrease at realized cost.
    Decrement,
    /// Stock decrease that additionally posts revenue at the sale price.
    Sale,
}

impl std::fmt::Display for InventoryTransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increment => write!(f, "increment"),
            Self::Decrement => write!(f, "decrement"),
            Self::Sale => write!(f, "sale"),
        }
    }
}

/// Type-specific data of an inventory transaction.
///
/// The variant determines the transaction kind; replaying a transaction
/// during a cascade preserves this payload verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionPayload {
    /// Adds a priced batch to stock.
    Increment {
        /// Quantity entering stock.
        quantity: Decimal,
        /// Acquisition cost per unit.
        cost_per_unit: Decimal,
    },
    /// Removes quantity from stock at its realized cost.
    Decrement {
        /// Quantity leaving stock.
        quantity: Decimal,
    },
    /// Removes quantity and posts revenue on the sale accounts.
    Sale {
        /// Quantity sold.
        quantity: Decimal,
        /// Sale price per unit.
        price_per_unit: Decimal,
        /// Account debited by the revenue entry.
        sale_debit_account: FinancialAccountId,
        /// Account credited by the revenue entry.
        sale_credit_account: FinancialAccountId,
    },
}

impl TransactionPayload {
    /// The movement kind carried by this payload.
    #[must_use]
    pub fn transaction_type(&self) -> InventoryTransactionType {
        match self {
            Self::Increment { .. } => InventoryTransactionType::Increment,
            Self::Decrement { .. } => InventoryTransactionType::Decrement,
            Self::Sale { .. } => InventoryTransactionType::Sale,
        }
    }

    /// The moved quantity.
    #[must_use]
    pub fn quantity(&self) -> Decimal {
        match self {
            Self::Increment { quantity, .. }
            | Self::Decrement { quantity }
            | Self::Sale { quantity, .. } => *quantity,
        }
    }
}

/// One movement against one inventory item.
///
/// Stock snapshots, the realized amount, and the valuation method are
/// frozen into the record at computation time. A transaction is logically
/// immutable once active; a later insertion at a smaller index supersedes
/// it entirely with a derived replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    /// Unique identifier.
    pub id: InventoryTransactionId,
    /// Financial unit that owns the item and accounts.
    pub financial_unit: FinancialUnitId,
    /// The inventory item the movement applies to.
    pub inventory_item: InventoryItemId,
    /// Human-readable description.
    pub description: String,
    /// Date the movement takes effect.
    pub effective_date: NaiveDate,
    /// Type-specific movement data.
    pub payload: TransactionPayload,
    /// Monetary magnitude of the movement, rounded to 2 decimal places.
    pub total_transaction_amount: Decimal,
    /// Stock snapshot immediately before the movement.
    pub stock_before_transaction: Stock,
    /// Stock snapshot immediately after the movement.
    pub stock_after_transaction: Stock,
    /// Valuation method in effect when the movement was computed.
    pub valuation_method_applied: StockValuationMethod,
    /// 0-based position within the item's log; dense and unique per item.
    pub transaction_index: usize,
    /// Account debited by the cost entry.
    pub debit_account: FinancialAccountId,
    /// Account credited by the cost entry.
    pub credit_account: FinancialAccountId,
    /// True if this record exists only because a later insertion forced
    /// its regeneration.
    pub is_derived_transaction: bool,
    /// Lineage pointer to the transaction whose insertion caused this
    /// one's regeneration. Not an ownership relationship.
    pub transaction_forcing_derivation: Option<InventoryTransactionId>,
    /// False until the surrounding operation activates the record.
    pub is_active: bool,
    /// Creation instant, used by the stale-record sweep.
    pub created: DateTime<Utc>,
    /// The user who created the transaction.
    pub creator: UserId,
}

impl InventoryTransaction {
    /// The movement kind.
    #[must_use]
    pub fn transaction_type(&self) -> InventoryTransactionType {
        self.payload.transaction_type()
    }
}

/// Input for creating a new inventory transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Financial unit that owns the item and accounts.
    pub financial_unit: FinancialUnitId,
    /// The inventory item the movement applies to.
    pub inventory_item: InventoryItemId,
    /// Human-readable description.
    pub description: String,
    /// Date the movement takes effect.
    pub effective_date: NaiveDate,
    /// Account debited by the cost entry.
    pub debit_account: FinancialAccountId,
    /// Account credited by the cost entry.
    pub credit_account: FinancialAccountId,
    /// Type-specific movement data.
    pub payload: TransactionPayload,
    /// Valuation method configured for the item.
    pub valuation_method: StockValuationMethod,
    /// Position to insert at within the item's log; appends when absent.
    pub insert_before_index: Option<usize>,
    /// The user creating the transaction.
    pub created_by: UserId,
}
