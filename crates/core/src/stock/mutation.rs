//! Pure stock mutation: increment and decrement with realized cost.
//!
//! Both operations are pure: given the same snapshot, method, and input
//! they always produce the same output, with no hidden state and no I/O.

use rust_decimal::Decimal;
use stockbook_shared::types::round_amount;

use super::batch::{Stock, StockBatch};
use super::error::StockError;
use super::valuation::{order_for_consumption, StockValuationMethod};

/// Result of one stock movement: the new snapshot plus the realized cost
/// of the moved quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockMovement {
    /// The snapshot after the movement.
    pub stock: Stock,
    /// Realized cost of the moved quantity, rounded to 2 decimal places.
    pub change_cost: Decimal,
}

/// Computes the result of removing `quantity` from a snapshot under a
/// valuation method.
///
/// The available quantity is recomputed from the batches; when it is
/// smaller than `quantity` the whole removal fails with
/// [`StockError::InsufficientStock`] and no partial removal occurs.
/// Batches are consumed in the order produced by
/// [`order_for_consumption`]; the realized cost of the removed quantity
/// feeds the financial entry amount for decrements and sales.
pub fn decrement(
    stock: &Stock,
    quantity: Decimal,
    method: StockValuationMethod,
) -> Result<StockMovement, StockError> {
    if quantity <= Decimal::ZERO {
        return Err(StockError::NonPositiveQuantity);
    }
    let available: Decimal = stock.batches.iter().map(|batch| batch.quantity).sum();
    if available < quantity {
        return Err(StockError::InsufficientStock {
            requested: quantity,
            available,
        });
    }

    let ordered = order_for_consumption(stock.clone(), method)?;
    let mut remaining = quantity;
    let mut change_cost = Decimal::ZERO;
    let mut consumed = Vec::with_capacity(ordered.batches.len());
    for batch in ordered.batches {
        if remaining.is_zero() {
            consumed.push(batch);
        } else if batch.quantity < remaining {
            change_cost += batch.cost();
            remaining -= batch.quantity;
            consumed.push(StockBatch {
                quantity: Decimal::ZERO,
                ..batch
            });
        } else {
            change_cost += remaining * batch.cost_per_unit;
            consumed.push(StockBatch {
                quantity: batch.quantity - remaining,
                ..batch
            });
            remaining = Decimal::ZERO;
        }
    }

    Ok(StockMovement {
        stock: Stock::from_batches(consumed),
        change_cost: round_amount(change_cost),
    })
}

/// Computes the result of adding a batch to a snapshot.
///
/// The batch is appended unchanged; identical-cost lots are never merged,
/// preserving acquisition identity for FIFO/LIFO ordering. Never fails for
/// non-negative quantity and cost.
#[must_use]
pub fn increment(stock: &Stock, batch: StockBatch) -> StockMovement {
    let change_cost = round_amount(batch.cost());
    let mut batches = stock.batches.clone();
    batches.push(batch);
    StockMovement {
        stock: Stock::from_batches(batches),
        change_cost,
    }
}
