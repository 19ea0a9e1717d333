//! Financial period types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{FinancialPeriodId, FinancialUnitId};

/// A posting period within a financial unit.
///
/// A transaction may only be staged when a period covering its effective
/// date exists in the owning unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialPeriod {
    /// Unique identifier.
    pub id: FinancialPeriodId,
    /// Financial unit this period belongs to.
    pub financial_unit: FinancialUnitId,
    /// Start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// End date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl FinancialPeriod {
    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn period() -> FinancialPeriod {
        FinancialPeriod {
            id: FinancialPeriodId::new(),
            financial_unit: FinancialUnitId::new(),
            start_date: date(1, 1),
            end_date: date(3, 31),
        }
    }

    #[test]
    fn test_contains_date_within_bounds() {
        assert!(period().contains_date(date(2, 15)));
    }

    #[test]
    fn test_contains_date_bounds_are_inclusive() {
        let period = period();
        assert!(period.contains_date(period.start_date));
        assert!(period.contains_date(period.end_date));
    }

    #[test]
    fn test_contains_date_outside_bounds() {
        assert!(!period().contains_date(date(4, 1)));
        assert!(!period().contains_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()));
    }
}
