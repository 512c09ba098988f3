//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for incident-trends operations.
///
/// Only the schema and input variants are expected during normal use; the
/// wrapped library errors surface when the report cannot be encoded or written.
#[derive(Debug, Error)]
pub enum Error {
    /// Required columns are absent from the input header
    #[error("Missing required columns: {missing:?}")]
    Schema { missing: Vec<String> },

    /// Input path does not resolve to a readable file
    #[error("CSV not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// CSV decoding errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Spreadsheet encoding errors
    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

impl Error {
    /// Create a schema error from the list of absent column names
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an input-not-found error for a path
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the run stopped before any aggregation happened
    pub fn is_precondition_failure(&self) -> bool {
        matches!(self, Self::Schema { .. } | Self::InputNotFound { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_lists_missing_columns() {
        let err = Error::schema(["priority", "resolved"]);
        assert_eq!(
            err.to_string(),
            r#"Missing required columns: ["priority", "resolved"]"#
        );
        assert!(err.is_precondition_failure());
    }

    #[test]
    fn test_input_not_found_message() {
        let err = Error::input_not_found("data/missing.csv");
        assert_eq!(err.to_string(), "CSV not found: data/missing.csv");
    }

    #[test]
    fn test_with_context_wraps_message() {
        let result: Result<()> = Err(Error::Configuration("zero SLA".into()));
        let err = result.context("loading config").unwrap_err();
        assert_eq!(
            err.to_string(),
            "loading config: Configuration error: zero SLA"
        );
        assert!(!err.is_precondition_failure());
    }
}
