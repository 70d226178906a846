use registration_core::error::CoreError;
use registration_core::validation::ValidationResult;

/// Errors surfaced by a form session.
///
/// Wraps [`CoreError`] for input faults and adds form-level variants.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Raw input could not be stored (unknown field, malformed value).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Submission blocked by validation errors.
    #[error("Form has {} invalid field(s)", .0.errors.len())]
    Invalid(ValidationResult),

    /// An environment variable held an unusable value.
    #[error("Invalid value for {var}: {value:?}")]
    Config { var: &'static str, value: String },
}
