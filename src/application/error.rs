//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("seed file not found: {0}")]
    SeedNotFound(PathBuf),

    #[error("invalid seed {origin}: {message}")]
    InvalidSeed { origin: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("unknown command: {0} (try 'help')")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(String),

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True when the user can simply retry with corrected input.
    pub fn is_recoverable(&self) -> bool {
        match self {
            ApplicationError::Domain(e) => e.is_input_error(),
            ApplicationError::UnknownCommand(_) | ApplicationError::Usage(_) => true,
            _ => false,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
