//! Directory walk: discover message files, parse them, and hand batches of
//! documents to a payload sink.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::ingest::batch::{Batcher, Payload};
use crate::ingest::probe::FileProbe;
use crate::model::document::Document;
use crate::parser::EmailParser;

/// Counters collected during a walk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Regular files discovered under the root.
    pub files_seen: u64,
    /// Zero-byte files skipped before parsing.
    pub empty_skipped: u64,
    /// Parsed files whose Message-ID stayed empty.
    pub non_email: u64,
    /// Files that could not be read.
    pub failed: u64,
    /// Documents handed to the sink.
    pub documents: u64,
    /// Payloads handed to the sink.
    pub batches: u64,
    /// Total size of the files that were parsed.
    pub bytes: u64,
}

/// Walk `root`, parse every non-empty file, and pass batches to `sink`.
///
/// Files are visited in sorted path order so repeated runs produce the same
/// payloads. A file that cannot be read is logged and counted, and the walk
/// goes on; a failing sink aborts it. `progress` receives the number of files
/// visited so far.
pub fn ingest_dir(
    root: &Path,
    config: &Config,
    sink: &mut dyn FnMut(&Payload<'_>) -> Result<()>,
    progress: Option<&dyn Fn(u64)>,
) -> Result<IngestStats> {
    let files = collect_files(root)?;
    info!(path = %root.display(), files = files.len(), "Ingesting directory");

    let parser = EmailParser::new(&config.parser);
    let index = config.ingest.index_name.as_str();
    let mut batcher = Batcher::new(config.ingest.batch_size);
    let mut stats = IngestStats::default();

    for path in files {
        stats.files_seen += 1;
        if let Some(cb) = progress {
            cb(stats.files_seen);
        }

        let probe = match FileProbe::stat(&path) {
            Ok(probe) => probe,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                stats.failed += 1;
                continue;
            }
        };
        if probe.is_empty() {
            debug!(path = %path.display(), "Skipping empty file");
            stats.empty_skipped += 1;
            continue;
        }

        let email = match parser.parse_file(&path) {
            Ok(email) => email,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                stats.failed += 1;
                continue;
            }
        };
        stats.bytes += probe.len;

        if !email.is_email() {
            stats.non_email += 1;
            if config.ingest.skip_non_email {
                debug!(path = %path.display(), "Dropping record without Message-ID");
                continue;
            }
        }

        if let Some(batch) = batcher.push(Document::new(path, email)) {
            emit(sink, index, &batch, &mut stats)?;
        }
    }

    if let Some(batch) = batcher.finish() {
        emit(sink, index, &batch, &mut stats)?;
    }

    info!(
        path = %root.display(),
        documents = stats.documents,
        batches = stats.batches,
        failed = stats.failed,
        "Ingest complete"
    );
    Ok(stats)
}

fn emit(
    sink: &mut dyn FnMut(&Payload<'_>) -> Result<()>,
    index: &str,
    batch: &[Document],
    stats: &mut IngestStats,
) -> Result<()> {
    sink(&Payload {
        index,
        records: batch,
    })?;
    stats.documents += batch.len() as u64;
    stats.batches += 1;
    Ok(())
}

/// All regular files under `root`, recursively, in sorted order.
///
/// Symbolic links are not followed.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root).map_err(|e| IngestError::open(root, e))?;
    if !metadata.is_dir() {
        return Err(IngestError::NotADirectory(root.to_path_buf()));
    }

    let mut files = Vec::new();
    visit(root, &mut files)?;
    Ok(files)
}

fn visit(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = std::fs::read_dir(dir)
        .map_err(|e| IngestError::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| IngestError::io(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| IngestError::io(&path, e))?;
        if file_type.is_dir() {
            visit(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Skipping non-regular file");
        }
    }
    Ok(())
}
