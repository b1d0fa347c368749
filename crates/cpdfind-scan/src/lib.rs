//! File discovery pipeline for cpdfind.
//!
//! This crate turns root paths, glob patterns and filter options into the
//! ordered list of source files a copy/paste detector should read, with
//! their content loaded.
//!
//! # Overview
//!
//! - **Pattern expansion** of each root with comma-separated globs
//! - **Serial enumeration** via jwalk, matched with globset
//! - **Filters** in fixed order: format, size, then line count
//! - **Symlink policy** for roots and traversal
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use cpdfind_scan::{FinderConfig, get_files_to_detect};
//!
//! let config = FinderConfig::builder()
//!     .path(vec![PathBuf::from("src")])
//!     .pattern("**/*.rs")
//!     .build()
//!     .unwrap();
//!
//! for file in get_files_to_detect(&config).unwrap() {
//!     println!("{} ({} lines)", file.path.display(), file.line_count());
//! }
//! ```
//!
//! # Diagnostics
//!
//! Skipped files are reported when `debug` or `verbose` is set. Supply any
//! closure or [`DiagnosticSink`] to capture them:
//!
//! ```rust,no_run
//! use std::path::Path;
//! use cpdfind_scan::{FileFinder, FinderConfig, SkipReason};
//!
//! let finder = FileFinder::with_sink(|path: &Path, reason: &SkipReason| {
//!     eprintln!("skip {}: {reason}", path.display());
//! });
//! let files = finder.find(&FinderConfig::new(".")).unwrap();
//! ```

mod expand;
mod filter;
mod finder;
mod loader;
mod path;
mod sink;
mod walker;

pub use expand::{Expression, expand_patterns, join_pattern, retain_roots};
pub use filter::{FilterChain, FormatFilter, LineCountFilter, SizeFilter};
pub use finder::{FileFinder, get_files_to_detect};
pub use loader::load;
pub use path::{is_file, is_symlink};
pub use sink::{DiagnosticSink, NullSink, TracingSink};
pub use walker::{GlobWalker, WalkOptions, split_pattern};

// Re-export core types for convenience
pub use cpdfind_core::{
    Entry, EntryKind, EntryStats, EntryWithContent, FinderConfig, FinderError, Result, SkipReason,
};
