//! Cheap checks run before a file is handed to the parser.

use std::path::Path;

use crate::error::{IngestError, Result};

/// Stat-only facts about a candidate file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileProbe {
    /// Size in bytes.
    pub len: u64,
}

impl FileProbe {
    /// Stat `path` without opening it.
    pub fn stat(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path).map_err(|e| IngestError::open(path, e))?;
        Ok(Self {
            len: metadata.len(),
        })
    }

    /// Zero-byte files are never parsed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// `true` if the file at `path` has zero bytes.
pub fn is_empty_file(path: impl AsRef<Path>) -> Result<bool> {
    Ok(FileProbe::stat(path)?.is_empty())
}
