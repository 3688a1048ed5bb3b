//! Fixed-size batching of documents and their JSON payload encoding.

use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{IngestError, Result};
use crate::model::document::Document;

/// One batch of documents addressed to a search index.
///
/// Encoded as `{"index": "...", "records": [...]}`.
#[derive(Debug, Serialize)]
pub struct Payload<'a> {
    pub index: &'a str,
    pub records: &'a [Document],
}

impl Payload<'_> {
    /// Write the payload as a single JSON line. `sink` names `out` in errors.
    pub fn write_json_line<W: Write + ?Sized>(&self, out: &mut W, sink: &Path) -> Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        out.write_all(b"\n").map_err(|e| IngestError::io(sink, e))
    }
}

/// Collects documents and releases them `size` at a time.
#[derive(Debug)]
pub struct Batcher {
    size: usize,
    pending: Vec<Document>,
}

impl Batcher {
    /// A batch size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            pending: Vec::with_capacity(size),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.size
    }

    /// Add a document. Returns a full batch once `size` documents are pending.
    pub fn push(&mut self, doc: Document) -> Option<Vec<Document>> {
        self.pending.push(doc);
        if self.pending.len() >= self.size {
            Some(std::mem::replace(
                &mut self.pending,
                Vec::with_capacity(self.size),
            ))
        } else {
            None
        }
    }

    /// Release whatever is left. `None` if nothing is pending.
    pub fn finish(&mut self) -> Option<Vec<Document>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::email::Email;

    fn doc(n: usize) -> Document {
        Document::new(format!("maildir/x/{n}."), Email::default())
    }

    #[test]
    fn test_batches_release_at_size() {
        let mut batcher = Batcher::new(2);
        assert!(batcher.push(doc(1)).is_none());
        let batch = batcher.push(doc(2)).expect("full batch");
        assert_eq!(batch.len(), 2);
        assert!(batcher.push(doc(3)).is_none());
        let rest = batcher.finish().expect("partial batch");
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].path(), std::path::Path::new("maildir/x/3."));
        assert!(batcher.finish().is_none());
    }

    #[test]
    fn test_zero_batch_size_means_one() {
        let mut batcher = Batcher::new(0);
        assert_eq!(batcher.batch_size(), 1);
        assert!(batcher.push(doc(1)).is_some());
    }

    #[test]
    fn test_payload_is_one_json_line() {
        let docs = vec![doc(1), doc(2)];
        let payload = Payload {
            index: "enronmail",
            records: &docs,
        };
        let mut out = Vec::new();
        payload
            .write_json_line(&mut out, std::path::Path::new("<memory>"))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(text.trim_end()).unwrap();
        assert_eq!(value["index"], "enronmail");
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["records"][1]["path"], "maildir/x/2.");
    }
}
