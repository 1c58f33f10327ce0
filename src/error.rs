//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying SQLite failure.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Input rejected before it reached the store.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Raw mode, alternate screen or draw failures in the interactive views.
    #[error("Terminal error: {0}")]
    Terminal(String),
}
