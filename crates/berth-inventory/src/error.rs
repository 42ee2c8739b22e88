//! Error types for inventory operations.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for inventory operations.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Errors that can occur talking to the metadata service.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("metadata request failed: {0}")]
    Request(String),

    #[error("metadata service returned status {0}")]
    Status(u16),

    #[error("metadata request timed out after {0:?}")]
    Timeout(Duration),

    #[error("metadata response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("gave up after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<InventoryError>,
    },
}
