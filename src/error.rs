//! Centralized error types for enronmail.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the enronmail library.
#[derive(Error, Debug)]
pub enum IngestError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// The ingest root is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// A batch payload could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for `Result<T, IngestError>`.
pub type Result<T> = std::result::Result<T, IngestError>;

impl IngestError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Map an open failure, turning `NotFound` into [`IngestError::FileNotFound`].
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_not_found_maps_to_file_not_found() {
        let err = IngestError::open(
            "/nope/1.",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, IngestError::FileNotFound(ref p) if p.ends_with("1.")));
    }

    #[test]
    fn test_open_permission_denied_maps_to_io() {
        let err = IngestError::open(
            "/root/secret",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IngestError::Io { .. }));
        assert!(err.to_string().contains("/root/secret"));
    }
}
