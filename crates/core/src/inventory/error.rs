//! Ledger error types.

use stockbook_shared::error::StoreError;
use stockbook_shared::types::{InventoryItemId, InventoryTransactionId};
use thiserror::Error;

use crate::posting::error::PostingError;
use crate::stock::StockError;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Movement quantity must be strictly positive.
    #[error("Transaction quantity must be positive")]
    NonPositiveQuantity,

    /// Acquisition cost per unit cannot be negative.
    #[error("Cost per unit cannot be negative")]
    NegativeUnitCost,

    /// Sale price per unit cannot be negative.
    #[error("Price per unit cannot be negative")]
    NegativeUnitPrice,

    /// Insertion position beyond the end of the item's log.
    #[error("Insert index {index} is out of range for a log of length {len}")]
    InsertIndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Current log length.
        len: usize,
    },

    /// No active transaction with the given id.
    #[error("Inventory transaction not found: {0}")]
    TransactionNotFound(InventoryTransactionId),

    /// A replayed step of a cascade failed. Everything staged during the
    /// attempt has been rolled back and the log is unchanged.
    #[error("Cascade aborted while replaying transaction at index {index}")]
    CascadeAborted {
        /// Log index of the failing replay step.
        index: usize,
        /// The underlying failure.
        #[source]
        source: Box<LedgerError>,
    },

    /// The item's active log is not a dense 0-based index range. Fatal;
    /// indicates concurrent mutation of the same item.
    #[error("Transaction index contiguity violated for item {0}")]
    IndexContiguityViolation(InventoryItemId),

    /// Stock valuation or mutation failure.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// Entry staging failure.
    #[error(transparent)]
    Posting(#[from] PostingError),

    /// Storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LedgerError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveQuantity => "NON_POSITIVE_QUANTITY",
            Self::NegativeUnitCost => "NEGATIVE_UNIT_COST",
            Self::NegativeUnitPrice => "NEGATIVE_UNIT_PRICE",
            Self::InsertIndexOutOfRange { .. } => "INSERT_INDEX_OUT_OF_RANGE",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::CascadeAborted { .. } => "CASCADE_ABORTED",
            Self::IndexContiguityViolation(_) => "INDEX_CONTIGUITY_VIOLATION",
            Self::Stock(err) => err.error_code(),
            Self::Posting(err) => err.error_code(),
            Self::Store(_) => "STORE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and precondition errors
            Self::NonPositiveQuantity
            | Self::NegativeUnitCost
            | Self::NegativeUnitPrice
            | Self::InsertIndexOutOfRange { .. }
            | Self::Stock(_)
            | Self::Posting(PostingError::PeriodNotFound { .. } | PostingError::AccountNotFound(_)) => {
                400
            }

            // 404 Not Found
            Self::TransactionNotFound(_) => 404,

            // 409 Conflict - the attempted change collided with log state
            Self::CascadeAborted { .. } => 409,

            // 500 Internal Server Error
            Self::IndexContiguityViolation(_)
            | Self::Posting(PostingError::Store(_))
            | Self::Store(_) => 500,
        }
    }
}
