//! Typed errors for extraction runs and metadata assertions.

use thiserror::Error;

/// Failures an extractor under test may raise.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Reading the staged content failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The extraction plugin rejected the content or its own setup
    #[error("plugin error: {0}")]
    Plugin(String),

    /// A configuration parameter the plugin needs was not supplied
    #[error("missing configuration parameter: {key}")]
    MissingConfig { key: String },

    /// Content could not be interpreted
    #[error("malformed content at {url:?}: {reason}")]
    Malformed { url: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExtractError {
    pub fn plugin(msg: impl Into<String>) -> Self {
        Self::Plugin(msg.into())
    }

    pub fn malformed(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Malformed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// I/O-class failures: the content could not be read or decoded.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Malformed { .. })
    }

    /// Plugin-class failures: the extractor or its configuration is at fault.
    pub fn is_plugin(&self) -> bool {
        matches!(self, Self::Plugin(_) | Self::MissingConfig { .. })
    }
}

/// A mismatch between extracted metadata and what the test expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssertionFailure {
    #[error("expected {expected} metadata record(s), got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("field {field}: expected {expected:?}, got {actual:?}")]
    FieldMismatch {
        field: String,
        expected: String,
        actual: Option<String>,
    },
}

/// Result type alias for extractor implementations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
