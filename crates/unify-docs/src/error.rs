//! Error types for documentation parsing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading documentation units.
///
/// Malformed content never errors: bad rows are dropped and sections
/// without a header contribute nothing.
#[derive(Debug, Error)]
pub enum DocsError {
    #[error("documentation directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read documentation unit {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid documentation label pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl DocsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DocsError>;
