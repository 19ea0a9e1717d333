//! Financial period types.

pub mod period;

pub use period::FinancialPeriod;
