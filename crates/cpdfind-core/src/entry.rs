//! File entry records produced by enumeration.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Type of a file system entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link (when not followed).
    Symlink,
    /// Other file types (sockets, devices, etc.).
    Other,
}

impl EntryKind {
    /// Classify file metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_file() {
            EntryKind::File
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }

    /// Check if this is a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, EntryKind::File)
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryKind::Directory)
    }

    /// Check if this is a symlink.
    pub fn is_symlink(&self) -> bool {
        matches!(self, EntryKind::Symlink)
    }
}

/// Metadata captured at enumeration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStats {
    /// Size in bytes.
    pub size: u64,
    /// Entry type.
    pub kind: EntryKind,
}

impl EntryStats {
    /// Create stats from raw values.
    pub fn new(size: u64, kind: EntryKind) -> Self {
        Self { size, kind }
    }

    /// Capture stats from file metadata.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        Self {
            size: metadata.len(),
            kind: EntryKind::from_metadata(metadata),
        }
    }
}

/// A file matched by enumeration, before its content is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Path as produced by the walker.
    pub path: PathBuf,
    /// Metadata captured during the walk.
    pub stats: EntryStats,
}

impl Entry {
    /// Create a new entry.
    pub fn new(path: impl Into<PathBuf>, stats: EntryStats) -> Self {
        Self {
            path: path.into(),
            stats,
        }
    }

    /// Path of the entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name component, lossily converted.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// An entry together with its decoded text content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryWithContent {
    /// Path as produced by the walker.
    pub path: PathBuf,
    /// Metadata captured during the walk.
    pub stats: EntryStats,
    /// Full decoded file content.
    pub content: String,
}

impl EntryWithContent {
    /// Attach content to an entry.
    pub fn new(entry: Entry, content: String) -> Self {
        Self {
            path: entry.path,
            stats: entry.stats,
            content,
        }
    }

    /// Number of `\n`-separated segments in the content.
    ///
    /// An empty file counts as one line, and a trailing newline opens a new one.
    pub fn line_count(&self) -> usize {
        self.content.split('\n').count()
    }
}
