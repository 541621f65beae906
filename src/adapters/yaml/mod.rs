//! YAML document sink
//!
//! Serializes [`Record`](crate::domain::Record)s as block-style YAML files.

pub mod writer;

pub use writer::{write_record, DocumentWriter};
