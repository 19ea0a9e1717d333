//! Property tests for the stock mutation engine.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockbook_shared::types::round_amount;

use super::batch::{Stock, StockBatch};
use super::mutation::{decrement, increment};
use super::valuation::StockValuationMethod;

/// Strategy for batch quantities: 0.1 to 100.0 in tenths.
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=1_000).prop_map(|n| Decimal::new(n, 1))
}

/// Strategy for unit costs: 0.00 to 100.00 in cents.
fn cost_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|n| Decimal::new(n, 2))
}

fn method_strategy() -> impl Strategy<Value = StockValuationMethod> {
    prop_oneof![
        Just(StockValuationMethod::Fifo),
        Just(StockValuationMethod::Lifo),
        Just(StockValuationMethod::Average),
    ]
}

fn batch_specs_strategy(max_len: usize) -> impl Strategy<Value = Vec<(Decimal, Decimal)>> {
    prop::collection::vec((quantity_strategy(), cost_strategy()), 1..=max_len)
}

fn build_stock(specs: &[(Decimal, Decimal)]) -> Stock {
    let mut stock = Stock::empty();
    for (index, (quantity, cost_per_unit)) in specs.iter().enumerate() {
        stock = increment(
            &stock,
            StockBatch {
                quantity: *quantity,
                cost_per_unit: *cost_per_unit,
                added: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                transaction_index: index,
            },
        )
        .stock;
    }
    stock
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Total quantity after a removal equals the incremented sum minus the
    /// removed quantity, under every valuation method.
    #[test]
    fn prop_conservation_of_quantity(
        specs in batch_specs_strategy(6),
        removal_tenths in 1i64..=1_000,
        method in method_strategy(),
    ) {
        let stock = build_stock(&specs);
        let incremented: Decimal = specs.iter().map(|(quantity, _)| *quantity).sum();
        // Scale the removal into the available range so it always succeeds.
        let quantity = (Decimal::new(removal_tenths, 1) * incremented / Decimal::new(100, 0))
            .min(incremented)
            .max(Decimal::new(1, 1));

        let movement = decrement(&stock, quantity, method).unwrap();
        prop_assert_eq!(
            movement.stock.total_stock_quantity,
            incremented - quantity,
            "quantity must be conserved across the removal"
        );
    }

    /// Decrementing twice with identical inputs yields identical outputs.
    #[test]
    fn prop_decrement_is_deterministic(
        specs in batch_specs_strategy(5),
        method in method_strategy(),
    ) {
        let stock = build_stock(&specs);
        let quantity = stock.total_stock_quantity / Decimal::new(2, 0);
        prop_assume!(quantity > Decimal::ZERO);

        let first = decrement(&stock, quantity, method).unwrap();
        let second = decrement(&stock, quantity, method).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Totals always match the sums over the surviving batches, and no
    /// surviving batch carries a non-positive quantity.
    #[test]
    fn prop_totals_match_batches_after_decrement(
        specs in batch_specs_strategy(6),
        method in method_strategy(),
    ) {
        let stock = build_stock(&specs);
        let quantity = stock.total_stock_quantity / Decimal::new(3, 0);
        prop_assume!(quantity > Decimal::ZERO);

        let movement = decrement(&stock, quantity, method).unwrap();
        let quantity_sum: Decimal = movement.stock.batches.iter().map(|b| b.quantity).sum();
        let cost_sum: Decimal = movement.stock.batches.iter().map(StockBatch::cost).sum();
        prop_assert_eq!(movement.stock.total_stock_quantity, quantity_sum);
        prop_assert_eq!(movement.stock.total_stock_cost, cost_sum);
        prop_assert!(movement.stock.batches.iter().all(|b| b.quantity > Decimal::ZERO));
    }

    /// Removing everything under FIFO or LIFO realizes the full pool cost
    /// and leaves the stock empty.
    #[test]
    fn prop_full_consumption_realizes_total_cost(
        specs in batch_specs_strategy(6),
        lifo in any::<bool>(),
    ) {
        let method = if lifo { StockValuationMethod::Lifo } else { StockValuationMethod::Fifo };
        let stock = build_stock(&specs);
        let total_cost = stock.total_stock_cost;

        let movement = decrement(&stock, stock.total_stock_quantity, method).unwrap();
        prop_assert!(movement.stock.is_empty());
        prop_assert_eq!(movement.change_cost, round_amount(total_cost));
    }

    /// Under average costing the realized cost of full consumption matches
    /// the pool cost to within one cent (the average unit cost is an
    /// inexact quotient).
    #[test]
    fn prop_full_average_consumption_within_one_cent(
        specs in batch_specs_strategy(6),
    ) {
        let stock = build_stock(&specs);
        let total_cost = stock.total_stock_cost;

        let movement = decrement(&stock, stock.total_stock_quantity, StockValuationMethod::Average)
            .unwrap();
        prop_assert!(movement.stock.is_empty());
        let difference = (movement.change_cost - round_amount(total_cost)).abs();
        prop_assert!(difference <= Decimal::new(1, 2));
    }

    /// Requesting more than the pool holds always fails and never mutates
    /// the input snapshot.
    #[test]
    fn prop_overdraw_always_rejected(
        specs in batch_specs_strategy(5),
        method in method_strategy(),
    ) {
        let stock = build_stock(&specs);
        let quantity = stock.total_stock_quantity + Decimal::new(1, 1);

        let before = stock.clone();
        let result = decrement(&stock, quantity, method);
        prop_assert!(result.is_err());
        prop_assert_eq!(stock, before);
    }
}
