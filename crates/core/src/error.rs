//! Error types for the persistence layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the persistence layer.
///
/// Missing rows are not errors: the service reports them as `None`/`false`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("transaction error: {message}")]
    Transaction { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl StoreError {
    /// Create a transaction error
    pub fn transaction<T: Into<String>>(message: T) -> Self {
        StoreError::Transaction {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        StoreError::Configuration {
            message: message.into(),
        }
    }
}
