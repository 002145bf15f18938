use std::io;
use thiserror::Error;

/// Application-wide error type for everything outside the pure computations.
///
/// Grade and intent computations are total and never produce this type; it covers
/// configuration, catalog loading and telemetry setup.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g. reading a catalog file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents data validation errors (e.g., invalid input format).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unknown grading system id).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Represents an error indicating that a rate limit has been exceeded.
    #[error("Rate limit exceeded, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
            AppError::RateLimited { retry_after_secs } => AppError::RateLimited {
                retry_after_secs: *retry_after_secs,
            },
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<dotenv::Error> for AppError {
    fn from(err: dotenv::Error) -> Self {
        AppError::Config(format!("Failed to read .env file: {}", err))
    }
}

impl From<tracing::subscriber::SetGlobalDefaultError> for AppError {
    fn from(err: tracing::subscriber::SetGlobalDefaultError) -> Self {
        AppError::Internal(format!("Failed to install tracing subscriber: {}", err))
    }
}
