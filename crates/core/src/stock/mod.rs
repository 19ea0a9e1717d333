//! Cost-batch stock snapshots and valuation.
//!
//! A stock snapshot is a set of priced batches plus cached totals. The
//! mutation engine computes the cost effect of adding or removing inventory
//! under a valuation method; every operation produces new snapshots, which
//! is what makes cascading recomputation of a transaction log tractable.

pub mod batch;
pub mod error;
pub mod mutation;
pub mod valuation;

#[cfg(test)]
mod mutation_props;

pub use batch::{Stock, StockBatch};
pub use error::StockError;
pub use mutation::{decrement, increment, StockMovement};
pub use valuation::{order_for_consumption, StockValuationMethod};
