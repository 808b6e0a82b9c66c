use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::mapping::{MappingError, MappingFormat};
use crate::resolve::ResolveError;
use crate::rewrite::RewriteError;

/// Failure to obtain mapping table bytes.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No mappings available for version `{version}`")]
    NotFound { version: String },

    #[error("Invalid version identifier `{0}`")]
    InvalidVersion(String),

    #[error("Failed to fetch `{url}`: {message}")]
    Fetch { url: String, message: String },

    #[error("I/O error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Fatal startup failure, named by the stage that failed.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Fetching mappings for `{version}` failed: {source}")]
    Fetch {
        version: String,
        #[source]
        source: SourceError,
    },

    #[error("Detecting mapping format failed: unsupported format {0}")]
    Detect(MappingFormat),

    #[error("Parsing mappings failed: {0}")]
    Parse(#[source] MappingError),

    #[error("Mappings do not declare namespace `{0}`")]
    Namespace(String),

    #[error("Creating the rewrite driver failed: {0}")]
    Driver(#[source] RewriteError),
}

impl InitError {
    /// Short name of the failing stage.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Fetch { .. } => "fetch",
            Self::Detect(_) => "detect",
            Self::Parse(_) => "parse",
            Self::Namespace(_) => "namespace",
            Self::Driver(_) => "driver",
        }
    }
}

impl From<MappingError> for InitError {
    fn from(error: MappingError) -> Self {
        match error {
            MappingError::UnsupportedFormat(format) => Self::Detect(format),
            MappingError::UnknownNamespace(namespace) => Self::Namespace(namespace),
            other => Self::Parse(other),
        }
    }
}

impl From<RewriteError> for InitError {
    fn from(error: RewriteError) -> Self {
        match error {
            RewriteError::Resolve(ResolveError::Mapping(mapping)) => Self::from(mapping),
            other => Self::Driver(other),
        }
    }
}
