//! Inclusion filters applied to enumerated entries.
//!
//! Filters are built once per run from the config and applied in a fixed
//! order: format, size, then (after content is loaded) line count. Each
//! returns the reason for rejecting an entry, or `None` to keep it.

use indexmap::IndexMap;

use cpdfind_core::{Entry, EntryWithContent, FinderConfig, Result, SkipReason, format_of};

/// Rejects entries whose format is unknown or not accepted.
#[derive(Debug, Clone)]
pub struct FormatFilter {
    accepted: Vec<String>,
    formats_exts: IndexMap<String, Vec<String>>,
}

impl FormatFilter {
    /// Create a format filter. An empty `accepted` list admits every known format.
    pub fn new(accepted: Vec<String>, formats_exts: IndexMap<String, Vec<String>>) -> Self {
        Self {
            accepted,
            formats_exts,
        }
    }

    pub fn rejects(&self, entry: &Entry) -> Option<SkipReason> {
        let format = format_of(&entry.path, &self.formats_exts);
        match format {
            Some(ref f) if self.accepted.is_empty() || self.accepted.contains(f) => None,
            _ => Some(SkipReason::UnsupportedFormat { format }),
        }
    }
}

/// Rejects entries strictly larger than a byte limit.
#[derive(Debug, Clone, Copy)]
pub struct SizeFilter {
    limit: u64,
}

impl SizeFilter {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn rejects(&self, entry: &Entry) -> Option<SkipReason> {
        let size = entry.stats.size;
        (size > self.limit).then_some(SkipReason::TooLarge {
            size,
            limit: self.limit,
        })
    }
}

/// Rejects content whose line count is outside an inclusive range.
#[derive(Debug, Clone, Copy)]
pub struct LineCountFilter {
    min: usize,
    max: usize,
}

impl LineCountFilter {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn rejects(&self, entry: &EntryWithContent) -> Option<SkipReason> {
        let lines = entry.line_count();
        (lines < self.min || lines > self.max).then_some(SkipReason::LinesOutOfRange {
            lines,
            min: self.min,
            max: self.max,
        })
    }
}

/// The ordered set of filters for one run.
#[derive(Debug, Clone)]
pub struct FilterChain {
    pub format: FormatFilter,
    pub size: SizeFilter,
    pub lines: LineCountFilter,
}

impl FilterChain {
    /// Build the chain from a config snapshot. Fails if `max_size` is malformed.
    pub fn from_config(config: &FinderConfig) -> Result<Self> {
        Ok(Self {
            format: FormatFilter::new(config.format.clone(), config.formats_exts.clone()),
            size: SizeFilter::new(config.max_size_bytes()?),
            lines: LineCountFilter::new(config.min_lines, config.max_lines),
        })
    }

    /// Metadata-only checks, format first.
    pub fn rejects_entry(&self, entry: &Entry) -> Option<SkipReason> {
        self.format
            .rejects(entry)
            .or_else(|| self.size.rejects(entry))
    }

    /// Content checks.
    pub fn rejects_content(&self, entry: &EntryWithContent) -> Option<SkipReason> {
        self.lines.rejects(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpdfind_core::{EntryKind, EntryStats};

    fn entry(path: &str, size: u64) -> Entry {
        Entry::new(path, EntryStats::new(size, EntryKind::File))
    }

    #[test]
    fn test_format_filter_any_known() {
        let filter = FormatFilter::new(Vec::new(), IndexMap::new());
        assert_eq!(filter.rejects(&entry("a.js", 1)), None);
        assert_eq!(
            filter.rejects(&entry("c.txt", 1)),
            Some(SkipReason::UnsupportedFormat { format: None })
        );
    }

    #[test]
    fn test_format_filter_accepted_set() {
        let filter = FormatFilter::new(vec!["python".to_string()], IndexMap::new());
        assert_eq!(filter.rejects(&entry("a.py", 1)), None);
        assert_eq!(
            filter.rejects(&entry("a.js", 1)),
            Some(SkipReason::UnsupportedFormat {
                format: Some("javascript".to_string())
            })
        );
    }

    #[test]
    fn test_size_filter_is_strict() {
        let filter = SizeFilter::new(1024);
        assert_eq!(filter.rejects(&entry("a.js", 1024)), None);
        assert_eq!(
            filter.rejects(&entry("a.js", 1025)),
            Some(SkipReason::TooLarge {
                size: 1025,
                limit: 1024
            })
        );
    }

    #[test]
    fn test_line_filter_inclusive_bounds() {
        let filter = LineCountFilter::new(2, 3);
        let with = |content: &str| EntryWithContent::new(entry("a.js", 0), content.to_string());

        assert!(filter.rejects(&with("one")).is_some());
        assert_eq!(filter.rejects(&with("one\ntwo")), None);
        assert_eq!(filter.rejects(&with("one\ntwo\nthree")), None);
        assert_eq!(
            filter.rejects(&with("1\n2\n3\n4")),
            Some(SkipReason::LinesOutOfRange {
                lines: 4,
                min: 2,
                max: 3
            })
        );
    }

    #[test]
    fn test_single_line_at_both_bounds() {
        let filter = LineCountFilter::new(1, 1);
        let content = EntryWithContent::new(entry("a.js", 0), "no trailing newline".to_string());
        assert_eq!(filter.rejects(&content), None);
    }

    #[test]
    fn test_chain_format_before_size() {
        let config = FinderConfig::builder()
            .path(vec![std::path::PathBuf::from(".")])
            .max_size("1b")
            .build()
            .unwrap();
        let chain = FilterChain::from_config(&config).unwrap();

        let reason = chain.rejects_entry(&entry("huge.txt", 10_000)).unwrap();
        assert!(matches!(reason, SkipReason::UnsupportedFormat { .. }));

        let reason = chain.rejects_entry(&entry("huge.js", 10_000)).unwrap();
        assert!(matches!(reason, SkipReason::TooLarge { .. }));
    }

    #[test]
    fn test_chain_invalid_max_size() {
        let mut config = FinderConfig::new(".");
        config.max_size = "lots".to_string();
        assert!(FilterChain::from_config(&config).is_err());
    }
}
