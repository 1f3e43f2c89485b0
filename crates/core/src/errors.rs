use thiserror::Error;

/// Unified error type for the entire stock-calculator-core library.
/// Every public function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input / Formula ─────────────────────────────────────────────
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Calculation failed: {0}")]
    CalculationError(String),

    // ── Saved Calculations ──────────────────────────────────────────
    #[error("Calculation record not found: {0}")]
    RecordNotFound(String),

    // ── Persistence ─────────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported store version: {0}")]
    UnsupportedVersion(u32),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Shorthand for a single-field input error.
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        CoreError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the error comes from user-entered data rather than the environment.
    /// The UI reports these per-field or inline; the rest as a general message.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::InvalidInput { .. }
                | CoreError::ValidationError(_)
                | CoreError::CalculationError(_)
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}
