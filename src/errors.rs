use thiserror::Error;
use uuid::Uuid;

/// Error type that captures rent ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Payment not found: {0}")]
    NotFound(Uuid),
    #[error("Unable to read collection: {0}")]
    StorageRead(String),
    #[error("Invalid month key `{0}` (expected YYYY-MM)")]
    InvalidMonthKey(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
