//! Content loading for filtered entries.

use std::fs;

use cpdfind_core::{Entry, EntryWithContent, FinderError, Result};

/// Read an entry's file and attach its text.
///
/// Content is decoded as UTF-8; invalid sequences become U+FFFD. Any read
/// failure is returned as [`FinderError::Read`].
pub fn load(entry: Entry) -> Result<EntryWithContent> {
    let bytes = fs::read(&entry.path).map_err(|e| FinderError::read(&entry.path, e))?;
    let content = match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    };
    Ok(EntryWithContent::new(entry, content))
}
