use crate::types::Field;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid input for {field}: {value:?} ({reason})")]
    InvalidInput {
        field: Field,
        value: String,
        reason: String,
    },
}
