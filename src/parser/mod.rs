//! Enron message parsing: line classification, field value building, and
//! body accumulation.

pub mod body;
pub mod builder;
pub mod email;
pub mod extract;
pub mod line;

pub use email::{parse_email, EmailParser};
