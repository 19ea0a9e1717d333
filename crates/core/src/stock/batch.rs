//! Stock batch and snapshot types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One priced lot of inventory acquired at a single point in time.
///
/// Batches are owned exclusively by the [`Stock`] they belong to and are
/// never mutated in place; every operation produces new batch values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBatch {
    /// Quantity remaining in this batch.
    pub quantity: Decimal,
    /// Acquisition cost per unit.
    pub cost_per_unit: Decimal,
    /// Date the batch entered stock.
    pub added: NaiveDate,
    /// Log index of the transaction that created the batch.
    pub transaction_index: usize,
}

impl StockBatch {
    /// Total acquisition cost carried by this batch.
    #[must_use]
    pub fn cost(&self) -> Decimal {
        self.quantity * self.cost_per_unit
    }
}

/// An immutable snapshot of an item's stock: cost batches plus totals.
///
/// Invariant: `total_stock_quantity` and `total_stock_cost` equal the sums
/// over the batches, and zero-quantity batches are pruned. Snapshots are
/// built through [`Stock::from_batches`], which enforces both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Sum of all batch quantities.
    pub total_stock_quantity: Decimal,
    /// Sum of `quantity * cost_per_unit` over all batches.
    pub total_stock_cost: Decimal,
    /// The cost batches. Order is irrelevant until a valuation method is
    /// applied.
    pub batches: Vec<StockBatch>,
}

impl Stock {
    /// An empty snapshot: no batches, zero totals.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a snapshot from batches, pruning zero-quantity batches and
    /// recomputing both totals.
    #[must_use]
    pub fn from_batches(batches: Vec<StockBatch>) -> Self {
        let batches: Vec<StockBatch> = batches
            .into_iter()
            .filter(|batch| batch.quantity > Decimal::ZERO)
            .collect();
        let total_stock_quantity = batches.iter().map(|batch| batch.quantity).sum();
        let total_stock_cost = batches.iter().map(StockBatch::cost).sum();
        Self {
            total_stock_quantity,
            total_stock_cost,
            batches,
        }
    }

    /// Returns true if the snapshot holds no stock.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    #[test]
    fn test_empty_stock() {
        let stock = Stock::empty();
        assert!(stock.is_empty());
        assert_eq!(stock.total_stock_quantity, Decimal::ZERO);
        assert_eq!(stock.total_stock_cost, Decimal::ZERO);
    }

    #[test]
    fn test_from_batches_recomputes_totals() {
        let stock = Stock::from_batches(vec![
            StockBatch {
                quantity: dec!(5),
                cost_per_unit: dec!(10),
                added: date(1),
                transaction_index: 0,
            },
            StockBatch {
                quantity: dec!(3),
                cost_per_unit: dec!(20),
                added: date(2),
                transaction_index: 1,
            },
        ]);
        assert_eq!(stock.total_stock_quantity, dec!(8));
        assert_eq!(stock.total_stock_cost, dec!(110));
    }

    #[test]
    fn test_from_batches_prunes_empty_batches() {
        let stock = Stock::from_batches(vec![
            StockBatch {
                quantity: dec!(0),
                cost_per_unit: dec!(10),
                added: date(1),
                transaction_index: 0,
            },
            StockBatch {
                quantity: dec!(4),
                cost_per_unit: dec!(15),
                added: date(2),
                transaction_index: 1,
            },
        ]);
        assert_eq!(stock.batches.len(), 1);
        assert_eq!(stock.batches[0].transaction_index, 1);
        assert_eq!(stock.total_stock_quantity, dec!(4));
        assert_eq!(stock.total_stock_cost, dec!(60));
    }

    #[test]
    fn test_batch_cost() {
        let batch = StockBatch {
            quantity: dec!(2.5),
            cost_per_unit: dec!(4),
            added: date(1),
            transaction_index: 0,
        };
        assert_eq!(batch.cost(), dec!(10));
    }
}
