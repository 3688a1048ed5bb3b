//! A parsed email paired with the file it came from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::email::Email;

/// The unit handed to downstream indexing: one per input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Path of the source file as it was discovered by the walker.
    pub path: PathBuf,
    pub email: Email,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, email: Email) -> Self {
        Self {
            path: path.into(),
            email,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_json_shape() {
        let doc = Document::new("maildir/allen-p/sent/1.", Email::default());
        let value = serde_json::to_value(&doc).expect("serialize");
        assert_eq!(value["path"], "maildir/allen-p/sent/1.");
        assert_eq!(value["email"]["Body"], "");
    }
}
