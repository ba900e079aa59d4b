use thiserror::Error;

/// Rejection of a raw facility payload before any stage runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputShapeError {
    #[error("invalid JSON payload: {0}")]
    Malformed(String),

    #[error("facility payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("required field `{0}` is missing")]
    MissingRequiredField(&'static str),

    #[error("field `{field}` has the wrong type: expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}
