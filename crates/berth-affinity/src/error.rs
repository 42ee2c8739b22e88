//! Error types for constraint parsing.

use thiserror::Error;

/// Result type alias for affinity operations.
pub type AffinityResult<T> = Result<T, AffinityError>;

/// Errors raised while parsing affinity labels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AffinityError {
    #[error("affinity label {key:?} has no definition after the prefix")]
    MissingDefinition { key: String },

    #[error("affinity label {key:?} declares an unknown constraint kind")]
    UnknownKind { key: String },

    #[error("host label value {value:?} is not a key=value pair")]
    MalformedHostLabel { value: String },
}
