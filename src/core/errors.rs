//! Error types for the xenoglot-rs library.
//!
//! Structured error types that preserve context and enable proper error
//! propagation throughout the analysis pipeline. The core rarity and
//! weirdness algorithms never fail on well-formed data; errors arise only
//! from configuration and the I/O surfaces.

use std::io;
use std::num::ParseFloatError;

use thiserror::Error;

/// Main result type for xenoglot operations.
pub type Result<T> = std::result::Result<T, XenoglotError>;

/// Comprehensive error type for all xenoglot operations.
#[derive(Error, Debug)]
pub enum XenoglotError {
    /// I/O related errors (file operations, etc.)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Tabular input parsing errors
    #[error("Parse error: {message}")]
    Parse {
        /// Error description
        message: String,
        /// File path where error occurred
        file_path: Option<String>,
        /// Record number (if available)
        record: Option<usize>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being serialized
        format: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl XenoglotError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            file_path: None,
            record: None,
        }
    }

    /// Create a new parse error with file context
    pub fn parse_with_location(
        message: impl Into<String>,
        file_path: impl Into<String>,
        record: Option<usize>,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            file_path: Some(file_path.into()),
            record,
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Internal { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }
}

impl From<io::Error> for XenoglotError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for XenoglotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            format: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for XenoglotError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            format: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<csv::Error> for XenoglotError {
    fn from(err: csv::Error) -> Self {
        Self::Parse {
            message: format!("CSV processing failed: {err}"),
            file_path: None,
            record: None,
        }
    }
}

impl From<ParseFloatError> for XenoglotError {
    fn from(err: ParseFloatError) -> Self {
        Self::parse(format!("Float parsing failed: {err}"))
    }
}

/// Extension trait for adding context to results
pub trait XenoglotResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> XenoglotResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}
