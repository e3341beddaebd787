//! Rewrite error types.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// RewriteError
// ============================================================================

/// Errors raised while rewriting a single file
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("IO error on `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{path}` is not valid UTF-8")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl RewriteError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn decode(path: &Path, source: std::str::Utf8Error) -> Self {
        Self::Decode {
            path: path.to_path_buf(),
            source,
        }
    }

    /// File the error refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Decode { path, .. } => path,
        }
    }

    /// The file could not be found when opened.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// Message with the underlying cause appended, for single-line reports.
    pub fn detail(&self) -> String {
        match self {
            Self::Io { source, .. } => format!("{self}: {source}"),
            Self::Decode { source, .. } => format!("{self}: {source}"),
        }
    }
}
