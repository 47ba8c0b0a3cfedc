//! Error type for map operations.

use thiserror::Error;

use wirekv_store::StoreError;

/// Errors a map operation can surface.
///
/// Absence of a key is never an error — those cases resolve to `None` or
/// `false` results. A `MapError` always means the answer could not be
/// determined.
#[derive(Debug, Clone, Error)]
pub enum MapError {
    /// The backing store could not be reached or queried
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The keyspace holds more entries than the count type can represent
    #[error("keyspace holds {count} entries, exceeding the addressable range")]
    CountOverflow {
        /// The count the store reported
        count: u64,
    },
}

/// Result type alias for map operations
pub type MapResult<T> = Result<T, MapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_passes_through() {
        let err = MapError::from(StoreError::unavailable("connection refused"));
        let display = format!("{}", err);
        assert!(display.contains("store unavailable"));
    }

    #[test]
    fn test_count_overflow_display() {
        let err = MapError::CountOverflow { count: u64::MAX };
        let display = format!("{}", err);
        assert!(display.contains("exceeding"));
    }
}
