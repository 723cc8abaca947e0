//! Input ingestion: reading target rows.

pub mod targets;

pub use targets::{parse_record, parse_targets, read_targets, INPUT_HEADER};
