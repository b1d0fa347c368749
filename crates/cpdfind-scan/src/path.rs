//! Root path classification.
//!
//! Both checks look at the path itself, not a symlink target. A path that
//! cannot be inspected is neither a file nor a symlink.

use std::fs;
use std::path::Path;

/// Check if `path` is a regular file.
pub fn is_file(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_file())
}

/// Check if `path` is a symbolic link.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
}
