//! Error types for store operations
//!
//! Every failure a connection provider or store command can produce is a
//! StoreError. Absence of a key is never an error — commands report it as
//! `Ok(None)` or `Ok(false)`, so callers can always tell "not present"
//! from "could not determine".

use std::time::Duration;

use thiserror::Error;

/// Store error types with context for debugging and recovery
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be reached or refused the command
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Human-readable description of the failure
        message: String,
    },

    /// Every pooled connection stayed in use for the full acquisition timeout
    #[error("connection pool exhausted: {max} connections in use after waiting {waited:?}")]
    PoolExhausted {
        /// Pool capacity
        max: usize,
        /// How long acquisition waited before giving up
        waited: Duration,
    },

    /// A logical database index outside the store's configured range
    #[error("database index {index} out of range: store has {databases} databases")]
    DbOutOfRange {
        /// The requested index
        index: u16,
        /// Number of logical databases the store was configured with
        databases: u16,
    },
}

impl StoreError {
    /// Shorthand for an `Unavailable` error with the given message.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StoreError::Unavailable { message: message.into() }
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_display() {
        let err = StoreError::unavailable("connection refused");
        let display = format!("{}", err);
        assert!(display.contains("store unavailable"));
        assert!(display.contains("connection refused"));
    }

    #[test]
    fn test_pool_exhausted_display() {
        let err = StoreError::PoolExhausted {
            max: 8,
            waited: Duration::from_secs(5),
        };
        let display = format!("{}", err);
        assert!(display.contains("pool exhausted"));
        assert!(display.contains("8"));
    }

    #[test]
    fn test_db_out_of_range_display() {
        let err = StoreError::DbOutOfRange { index: 42, databases: 16 };
        let display = format!("{}", err);
        assert!(display.contains("42"));
        assert!(display.contains("16"));
    }
}
