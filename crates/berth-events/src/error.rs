//! Error types for event handling.

use thiserror::Error;

/// Result type alias for event operations.
pub type EventResult<T> = Result<T, EventError>;

/// Errors raised while decoding or dispatching transport events.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("event {id:?} does not carry a scheduler request")]
    MissingRequest { id: String },

    #[error("scheduler request in event {id:?} failed to decode: {source}")]
    Decode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no handler for event {0:?}")]
    UnhandledEvent(String),
}
