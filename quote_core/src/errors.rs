//! # Error Types
//!
//! Structured error types for quote_core. Every failure carries enough
//! context (field, offending value, reason) for a caller to report it or
//! fix the input without parsing a message string.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_rate(rate_per_kg: f64) -> QuoteResult<()> {
//!     if rate_per_kg < 0.0 {
//!         return Err(QuoteError::InvalidInput {
//!             field: "rate_per_kg".to_string(),
//!             value: rate_per_kg.to_string(),
//!             reason: "Rate must not be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for quotation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (negative, NaN, infinite, malformed)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// The quote has no items, so there is no table to anchor totals to
    #[error("Quote '{quote_no}' has no items")]
    EmptyQuote { quote_no: String },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Settings file could not be parsed or holds an unusable value
    #[error("Config error in '{source_name}': {reason}")]
    ConfigError { source_name: String, reason: String },

    /// The canvas failed to produce the document
    #[error("Render failed: {stage} - {reason}")]
    RenderFailed { stage: String, reason: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an EmptyQuote error
    pub fn empty_quote(quote_no: impl Into<String>) -> Self {
        QuoteError::EmptyQuote {
            quote_no: quote_no.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::ConfigError {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error
    pub fn render_failed(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::RenderFailed {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::EmptyQuote { .. } => "EMPTY_QUOTE",
            QuoteError::FileError { .. } => "FILE_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::ConfigError { .. } => "CONFIG_ERROR",
            QuoteError::RenderFailed { .. } => "RENDER_FAILED",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_input("items[0].length_cm", "-5", "Dimension must not be negative");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"InvalidInput\""));
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(QuoteError::empty_quote("Q-1").error_code(), "EMPTY_QUOTE");
        assert_eq!(QuoteError::config_error("settings.toml", "bad").error_code(), "CONFIG_ERROR");
        assert_eq!(QuoteError::render_failed("compile", "oops").error_code(), "RENDER_FAILED");
    }

    #[test]
    fn test_display_includes_context() {
        let error = QuoteError::file_error("write", "/tmp/out.pdf", "permission denied");
        assert_eq!(
            error.to_string(),
            "File error: write on '/tmp/out.pdf' - permission denied"
        );
    }
}
