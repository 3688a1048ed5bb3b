//! Ingest pipeline around the parser: emptiness probe, directory walk, and
//! batched JSON payloads.

pub mod batch;
pub mod probe;
pub mod walker;

pub use batch::{Batcher, Payload};
pub use probe::{is_empty_file, FileProbe};
pub use walker::{collect_files, ingest_dir, IngestStats};
