//! Shared types and errors for Stockbook.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Monetary rounding with decimal precision
//! - Storage error types shared by the persistence ports

pub mod error;
pub mod types;

pub use error::{StoreError, StoreResult};
