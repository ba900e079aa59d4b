use thiserror::Error;

/// Ledger persistence errors. Integrity failures are not errors; they are
/// reported through verification results.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ledger serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("corrupt ledger record at line {line}: {reason}")]
    Corrupt { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
