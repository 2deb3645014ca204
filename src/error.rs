use thiserror::Error;

/// Signal-timing core error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Insufficient data: need at least 2 samples to estimate a sampling rate")]
    InsufficientData,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for core operations
pub type SignalResult<T> = Result<T, SignalError>;
