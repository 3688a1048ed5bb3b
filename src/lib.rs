//! `enronmail`: turn Enron-corpus message files into structured records.
//!
//! This crate provides the line-oriented message parser, the record types
//! handed to search indexing, and a thin ingest layer that walks a maildir
//! tree and batches parsed documents into JSON payloads.

pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod parser;
