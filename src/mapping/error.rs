//! Error types for mapping table loading and lookup.

use thiserror::Error;

use super::MappingFormat;

/// Errors that can occur while reading or querying a mapping table.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The stream is not in a format this crate can read.
    #[error("Unsupported mapping format: {0}")]
    UnsupportedFormat(MappingFormat),

    /// A row within a recognized format is malformed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A namespace was requested that the table never declared.
    #[error("Unknown namespace: {0}")]
    UnknownNamespace(String),

    /// IO error while reading the stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MappingError {
    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create an unknown namespace error.
    pub fn unknown_namespace(name: impl Into<String>) -> Self {
        Self::UnknownNamespace(name.into())
    }

    /// The line a parse error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}
