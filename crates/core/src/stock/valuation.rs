//! Batch consumption ordering under a valuation method.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::batch::{Stock, StockBatch};
use super::error::StockError;

/// Stock valuation method, determining which batches are consumed first
/// when stock decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockValuationMethod {
    /// First in, first out: oldest acquired batches are consumed first.
    Fifo,
    /// Last in, first out: newest acquired batches are consumed first.
    Lifo,
    /// Weighted average: the pool is treated as fungible at one average
    /// cost per unit.
    Average,
}

impl std::fmt::Display for StockValuationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fifo => write!(f, "fifo"),
            Self::Lifo => write!(f, "lifo"),
            Self::Average => write!(f, "average"),
        }
    }
}

impl std::str::FromStr for StockValuationMethod {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fifo" => Ok(Self::Fifo),
            "lifo" => Ok(Self::Lifo),
            "average" => Ok(Self::Average),
            other => Err(StockError::UnknownValuationMethod(other.to_string())),
        }
    }
}

/// Produces the batch consumption order for a snapshot under a method.
///
/// FIFO sorts ascending by originating transaction index, LIFO descending.
/// Average collapses the pool into a single synthetic batch at the average
/// cost per unit; per-lot identity is lost by design. The synthetic batch
/// carries the newest `added` date in the pool, keeping the function
/// deterministic. Snapshots with fewer than two batches are returned
/// unchanged, since ordering is moot.
pub fn order_for_consumption(
    stock: Stock,
    method: StockValuationMethod,
) -> Result<Stock, StockError> {
    if stock.batches.len() < 2 {
        return Ok(stock);
    }
    let Stock {
        total_stock_quantity,
        total_stock_cost,
        mut batches,
    } = stock;
    match method {
        StockValuationMethod::Fifo => batches.sort_by_key(|batch| batch.transaction_index),
        StockValuationMethod::Lifo => {
            batches.sort_by_key(|batch| std::cmp::Reverse(batch.transaction_index));
        }
        StockValuationMethod::Average => {
            if total_stock_quantity <= Decimal::ZERO {
                return Err(StockError::UndefinedAverageCost);
            }
            let added = batches
                .iter()
                .map(|batch| batch.added)
                .max()
                .unwrap_or(NaiveDate::MIN);
            batches = vec![StockBatch {
                quantity: total_stock_quantity,
                cost_per_unit: total_stock_cost / total_stock_quantity,
                added,
                transaction_index: 0,
            }];
        }
    }
    Ok(Stock {
        total_stock_quantity,
        total_stock_cost,
        batches,
    })
}
