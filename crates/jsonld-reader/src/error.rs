//! Error types for reader operations.

use thiserror::Error;

/// Error type for navigation and extraction.
///
/// Navigation errors are captured by [`Reader::read`](crate::Reader::read) and
/// stored on the resulting absent reader. Coercion errors are produced fresh by
/// the typed extraction methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    // Navigation errors
    /// No key of the current node-object matches the short key.
    #[error("Not found key: {0}")]
    KeyNotFound(String),
    /// Index is out of range for the current sequence.
    #[error("Not found index: {0}")]
    IndexNotFound(i128),
    /// Key navigation on a scalar or a sequence that is not a singleton.
    #[error("Not an object")]
    NotAnObject,
    /// Index navigation on something other than a sequence.
    #[error("Not an array")]
    NotAnArray,
    /// Neither a key nor an index was supplied.
    #[error("key or index is required")]
    MissingSelector,

    // Coercion errors
    /// Value cannot be rendered as a string.
    #[error("Not a string")]
    NotAString,
    /// Value is not numeric and does not parse as a number.
    #[error("Not a number")]
    NotANumber,
    /// Value is not a boolean or one of the accepted boolean tokens.
    #[error("Not a boolean")]
    NotABoolean,
}

/// Result type alias for reader operations.
pub type Result<T> = std::result::Result<T, Error>;
