//! Streams a JSON-lines source and reports which lines are not valid records.
//!
//! The source may be a local file, an http(s) resource, a gzip-compressed
//! version of either, or piped standard input.

pub mod builders;
pub mod core;
pub mod utils;
