//! Derived financial entries and the inactive/active staging protocol.
//!
//! Every inventory transaction posts one or more double-entry ledger
//! records. Records are written invisible (`is_active = false`) and become
//! observable only once the whole surrounding ledger operation has
//! succeeded; this staging discipline substitutes for a multi-document
//! atomic commit.

pub mod entry;
pub mod error;
pub mod staging;
pub mod store;

pub use entry::FinancialEntry;
pub use error::PostingError;
pub use staging::EntryStaging;
pub use store::{FinancialEntryStore, ReferenceLookup};
