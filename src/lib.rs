//! cpdfind - source file discovery for copy/paste detectors.
//!
//! Given root paths, glob patterns and filter options, cpdfind produces the
//! ordered list of files a duplicate-code detector should tokenize, each
//! with its content loaded:
//!
//! ```rust,no_run
//! use cpdfind::{FinderConfig, get_files_to_detect};
//!
//! let config = FinderConfig::from_json_file(".cpdfind.json").unwrap();
//! let files = get_files_to_detect(&config).unwrap();
//! println!("{} files to inspect", files.len());
//! ```
//!
//! The pipeline lives in [`cpdfind_scan`]; shared types in [`cpdfind_core`].

pub use cpdfind_core::{
    DEFAULT_MAX_LINES, DEFAULT_MAX_SIZE, DEFAULT_MIN_LINES, DEFAULT_PATTERN, Entry, EntryKind,
    EntryStats, EntryWithContent, FinderConfig, FinderConfigBuilder, FinderError, Result,
    SkipReason, format, parse_size,
};
pub use cpdfind_scan::{
    DiagnosticSink, FileFinder, NullSink, TracingSink, get_files_to_detect, is_file, is_symlink,
};
