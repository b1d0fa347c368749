//! Core types for cpdfind.
//!
//! This crate provides the data structures shared by the discovery pipeline:
//! configuration, entry records, error types, the format table and the
//! size-string parser.

mod config;
mod entry;
mod error;
pub mod format;
mod size;

pub use config::{
    DEFAULT_MAX_LINES, DEFAULT_MAX_SIZE, DEFAULT_MIN_LINES, DEFAULT_PATTERN, FinderConfig,
    FinderConfigBuilder, FinderConfigBuilderError,
};
pub use entry::{Entry, EntryKind, EntryStats, EntryWithContent};
pub use error::{FinderError, Result, SkipReason};
pub use format::{format_of, supported_formats};
pub use size::parse_size;
