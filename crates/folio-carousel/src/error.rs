//! Error types for slide decks and carousel configuration.

use std::path::PathBuf;

/// Result type alias for carousel loading operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading decks or configuration.
///
/// The controller itself never fails; these only arise at the edges, where
/// TOML text or files are turned into typed values.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML parsing or shape error.
    #[error("Invalid {what} TOML: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: toml::de::Error,
    },

    /// File I/O error.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration value.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl Error {
    /// Create a parse error.
    pub fn parse(what: &'static str, source: toml::de::Error) -> Self {
        Self::Parse { what, source }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
