use carbon_ledger::LedgerError;
use carbon_types::InputShapeError;
use thiserror::Error;

/// Errors surfaced by the analysis pipeline and simulator.
///
/// Stage computations never fail; only ingestion and ledger persistence do.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid facility record: {0}")]
    InputShape(#[from] InputShapeError),

    #[error("invalid simulation adjustment: {0}")]
    InvalidAdjustment(String),

    #[error("certificate ledger failure: {0}")]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_keep_their_context() {
        let err: EngineError = InputShapeError::MissingRequiredField("total_emission_tons").into();
        let msg = err.to_string();
        assert!(msg.starts_with("invalid facility record"));
        assert!(msg.contains("total_emission_tons"));
    }

    #[test]
    fn ledger_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: EngineError = LedgerError::from(io).into();
        assert!(matches!(err, EngineError::Ledger(_)));
        assert!(err.to_string().contains("read-only"));
    }
}
