//! Posting and staging errors.

use chrono::NaiveDate;
use stockbook_shared::error::StoreError;
use stockbook_shared::types::{FinancialAccountId, FinancialUnitId};
use thiserror::Error;

/// Errors that can occur while staging derived financial entries.
#[derive(Debug, Error)]
pub enum PostingError {
    /// No financial period in the unit covers the effective date.
    #[error("No financial period found for date {date}")]
    PeriodNotFound {
        /// The financial unit searched.
        financial_unit: FinancialUnitId,
        /// The date no period covers.
        date: NaiveDate,
    },

    /// Referenced account does not exist in the financial unit.
    #[error("Financial account not found: {0}")]
    AccountNotFound(FinancialAccountId),

    /// Storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PostingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::PeriodNotFound { .. } => "PERIOD_NOT_FOUND",
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::Store(_) => "STORE_ERROR",
        }
    }
}
