//! Stock valuation and mutation errors.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while valuing or mutating a stock snapshot.
#[derive(Debug, Error)]
pub enum StockError {
    /// Unknown valuation method requested; rejected before any mutation.
    #[error("Unknown stock valuation method: {0}")]
    UnknownValuationMethod(String),

    /// The quantity to remove must be strictly positive.
    #[error("Quantity to remove must be positive")]
    NonPositiveQuantity,

    /// The removal requests more quantity than the batches hold. No partial
    /// removal occurs.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the caller asked to remove.
        requested: Decimal,
        /// Quantity actually held across all batches.
        available: Decimal,
    },

    /// Average cost is undefined for a multi-batch pool with zero total
    /// quantity. Unreachable for snapshots built by `Stock::from_batches`,
    /// which prunes zero-quantity batches.
    #[error("Average cost is undefined for a zero-quantity pool")]
    UndefinedAverageCost,
}

impl StockError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownValuationMethod(_) => "UNKNOWN_VALUATION_METHOD",
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
            Self::UndefinedAverageCost => "UNDEFINED_AVERAGE_COST",
        }
    }
}
