//! Typed filesystem errors for tern.
//!
//! Every filesystem-facing operation in [crate::core] converts its `io::Error` into a [FsError]
//! so callers can decide how to present it (status message, preview notice) without matching
//! on raw error kinds.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a read-only filesystem access.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("permission denied: {}", path.display())]
    AccessDenied { path: PathBuf },

    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FsError {
    /// Maps an `io::Error` to the matching variant for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::AccessDenied { path }
            | Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::Io { path, .. } => path,
        }
    }

    /// Short reason without the path, used for preview notices.
    pub fn reason(&self) -> String {
        match self {
            Self::AccessDenied { .. } => "Permission denied".to_string(),
            Self::NotFound { .. } => "File not found".to_string(),
            Self::NotADirectory { .. } => "Not a directory".to_string(),
            Self::Io { source, .. } => source.to_string(),
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;
