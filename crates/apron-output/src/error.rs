//! Error types for apron-output.

use apron_sim::SimError;
use thiserror::Error;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;

impl From<OutputError> for SimError {
    fn from(e: OutputError) -> Self {
        SimError::Output(Box::new(e))
    }
}
