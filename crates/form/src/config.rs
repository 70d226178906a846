use crate::error::FormError;

/// When a form session re-runs validation.
///
/// Both triggers default to on. Submit always validates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormConfig {
    /// Re-validate after every value change (default: `true`).
    pub validate_on_change: bool,
    /// Re-validate when a field loses focus (default: `true`).
    pub validate_on_blur: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
        }
    }
}

impl FormConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default |
    /// |---------------------------|---------|
    /// | `FORM_VALIDATE_ON_CHANGE` | `true`  |
    /// | `FORM_VALIDATE_ON_BLUR`   | `true`  |
    pub fn from_env() -> Result<Self, FormError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read a `.env` file if one exists, then [`FormConfig::from_env`].
    pub fn load() -> Result<Self, FormError> {
        dotenvy::dotenv().ok();
        Self::from_env()
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FormError> {
        let defaults = Self::default();
        Ok(Self {
            validate_on_change: read_flag(
                &lookup,
                "FORM_VALIDATE_ON_CHANGE",
                defaults.validate_on_change,
            )?,
            validate_on_blur: read_flag(
                &lookup,
                "FORM_VALIDATE_ON_BLUR",
                defaults.validate_on_blur,
            )?,
        })
    }
}

fn read_flag(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: bool,
) -> Result<bool, FormError> {
    let Some(value) = lookup(var) else {
        return Ok(default);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(FormError::Config { var, value }),
    }
}
