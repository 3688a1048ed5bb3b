//! Core data model types: header fields, parsed emails, and documents.

pub mod document;
pub mod email;
pub mod field;
