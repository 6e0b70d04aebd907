//! Form error types
//!
//! Invalid input never surfaces here: it becomes field errors and a
//! `SubmitOutcome::Invalid`. `FormError` covers misuse of the API.

use thiserror::Error;

#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A path that names no field, or an education index out of range
    #[error("Unknown field: {path}")]
    UnknownField { path: String },

    /// A value of the wrong kind for the field
    #[error("Type error for field '{path}': expected {expected}, got {actual}")]
    InvalidType {
        path: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value written to a field that is currently disabled
    #[error("Field is disabled: {path}")]
    Disabled { path: String },

    /// A choice that is not in the catalog
    #[error("Unknown option for field '{path}': {value}")]
    UnknownOption { path: String, value: String },

    /// JSON input that does not have the field's shape
    #[error("Deserialization error for field '{path}': {error}")]
    Deserialization { path: String, error: String },

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The submit sink refused the values
    #[error("Submit sink failed: {0}")]
    Sink(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The form was closed; pending checks were cancelled
    #[error("Form is closed")]
    Closed,
}

impl FormError {
    pub fn unknown_field(path: impl Into<String>) -> Self {
        Self::UnknownField { path: path.into() }
    }

    pub fn invalid_type(path: impl Into<String>, expected: &'static str, actual: &'static str) -> Self {
        Self::InvalidType {
            path: path.into(),
            expected,
            actual,
        }
    }

    pub fn disabled(path: impl Into<String>) -> Self {
        Self::Disabled { path: path.into() }
    }

    pub fn unknown_option(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self::UnknownOption {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn deserialization(path: impl Into<String>, error: impl Into<String>) -> Self {
        Self::Deserialization {
            path: path.into(),
            error: error.into(),
        }
    }

    pub fn sink(reason: impl Into<String>) -> Self {
        Self::Sink(reason.into())
    }

    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl FormError {
    /// Error category for logging
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "unknown_field",
            Self::InvalidType { .. } => "invalid_type",
            Self::Disabled { .. } => "disabled",
            Self::UnknownOption { .. } => "unknown_option",
            Self::Deserialization { .. } => "deserialization_error",
            Self::Serialization(_) => "serialization_error",
            Self::Sink(_) => "sink_error",
            Self::Config(_) => "config_error",
            Self::Closed => "closed",
        }
    }

    /// Stable machine-readable code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownField { .. } => "FORM_UNKNOWN_FIELD",
            Self::InvalidType { .. } => "FORM_INVALID_TYPE",
            Self::Disabled { .. } => "FORM_FIELD_DISABLED",
            Self::UnknownOption { .. } => "FORM_UNKNOWN_OPTION",
            Self::Deserialization { .. } => "FORM_DESER_ERROR",
            Self::Serialization(_) => "FORM_SER_ERROR",
            Self::Sink(_) => "FORM_SINK_ERROR",
            Self::Config(_) => "FORM_CONFIG_ERROR",
            Self::Closed => "FORM_CLOSED",
        }
    }

    /// Only the sink can fail transiently.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Sink(_))
    }

    /// True for errors caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownField { .. }
                | Self::InvalidType { .. }
                | Self::Disabled { .. }
                | Self::UnknownOption { .. }
                | Self::Deserialization { .. }
        )
    }
}

impl From<serde_json::Error> for FormError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
