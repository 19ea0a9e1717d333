//! Per-item inventory transaction logs and cascading recomputation.
//!
//! This module implements the transaction ledger:
//! - Domain types for inventory transactions and their payloads
//! - The recomputation engine for appends, retroactive inserts, and deletes
//! - Persistence ports and an in-memory reference store
//! - Per-item locks for the caller-provided serialization requirement
//! - Error types for ledger operations

pub mod error;
pub mod ledger;
pub mod lock;
pub mod memory;
pub mod store;
pub mod types;


pub use error::LedgerError;
pub use ledger::TransactionLedger;
pub use lock::ItemLockRegistry;
pub use memory::MemoryStore;
pub use store::InventoryTransactionStore;
pub use types::{
    CreateTransactionInput, InventoryTransaction, InventoryTransactionType, TransactionPayload,
};
