//! Unified error types for oscal-insights.
//!
//! Every fatal condition in the analysis pipeline maps onto one
//! [`InsightsError`] variant; nothing is silently swallowed.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for oscal-insights operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InsightsError {
    /// Errors while parsing an OSCAL document
    #[error("Failed to parse OSCAL document: {context}")]
    Parse {
        context: String,
        #[source]
        source: ParseErrorKind,
    },

    /// Errors while resolving a control source (catalog or profile)
    #[error("Failed to resolve control source: {context}")]
    Resolve {
        context: String,
        #[source]
        source: ResolveErrorKind,
    },

    /// Errors during analysis itself
    #[error("Analysis failed: {0}")]
    Analysis(String),

    /// Errors during report generation
    #[error("Report generation failed: {0}")]
    Report(String),

    /// IO errors with path context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific parse error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("not an OSCAL document: expected a top-level \"catalog\" or \"profile\" object")]
    UnknownDocumentKind,

    #[error("{kind} document has unexpected shape: {message}")]
    UnexpectedShape { kind: String, message: String },
}

/// Specific resolution error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveErrorKind {
    #[error("profile import cycle involving {0}")]
    ImportCycle(String),

    #[error("profile has no imports")]
    EmptyProfile,
}

/// Convenient Result type for oscal-insights operations
pub type Result<T> = std::result::Result<T, InsightsError>;

impl InsightsError {
    /// Create a parse error with context
    pub fn parse(context: impl Into<String>, source: ParseErrorKind) -> Self {
        Self::Parse {
            context: context.into(),
            source,
        }
    }

    /// Create a resolve error with context
    pub fn resolve(context: impl Into<String>, source: ResolveErrorKind) -> Self {
        Self::Resolve {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Fatal error for a control id whose suffix does not parse as a number.
    pub fn malformed_control_id(id: &str) -> Self {
        Self::Analysis(format!(
            "control id '{id}' has a non-numeric suffix after its group separator"
        ))
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a report error
    pub fn report(message: impl Into<String>) -> Self {
        Self::Report(message.into())
    }
}

impl From<std::io::Error> for InsightsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for InsightsError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(
            "JSON deserialization",
            ParseErrorKind::InvalidJson(err.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = InsightsError::io("/workspace/component-definition.json", io_err);
        assert!(
            err.to_string()
                .contains("/workspace/component-definition.json")
        );
    }

    #[test]
    fn test_malformed_control_id_names_the_id() {
        let err = InsightsError::malformed_control_id("ac-xyz");
        assert!(err.to_string().contains("ac-xyz"));
    }

    #[test]
    fn test_parse_error_kind_display() {
        let err = InsightsError::parse(
            "reading nist-catalog.json",
            ParseErrorKind::UnknownDocumentKind,
        );
        let display = err.to_string();
        assert!(display.contains("nist-catalog.json"), "{display}");
    }
}
