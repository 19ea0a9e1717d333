//! Storage error types shared by the persistence ports.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a persistence backend.
///
/// The core treats the store as an opaque collaborator: any backend failure
/// is carried as a message and surfaced to the caller as an internal error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the operation.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend error from any displayable cause.
    #[must_use]
    pub fn backend(cause: impl std::fmt::Display) -> Self {
        Self::Backend(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = StoreError::backend("connection reset");
        assert_eq!(err.to_string(), "Storage backend error: connection reset");
    }
}
