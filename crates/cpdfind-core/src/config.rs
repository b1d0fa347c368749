//! Finder configuration types.

use std::fs;
use std::path::{Path, PathBuf};

use derive_builder::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FinderError, Result};
use crate::size::parse_size;

/// Pattern used when none is configured.
pub const DEFAULT_PATTERN: &str = "**/*";

/// Size limit used when none is configured.
pub const DEFAULT_MAX_SIZE: &str = "100kb";

/// Minimum line count used when none is configured.
pub const DEFAULT_MIN_LINES: usize = 5;

/// Maximum line count used when none is configured.
pub const DEFAULT_MAX_LINES: usize = 1000;

/// Configuration for a file discovery run.
///
/// Field names serialize in camelCase (`maxSize`, `formatsExts`, ...) so a
/// project options file can be deserialized directly.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(rename_all = "camelCase")]
pub struct FinderConfig {
    /// Root paths to search, files or directories.
    #[serde(default = "default_paths")]
    pub path: Vec<PathBuf>,

    /// Comma-separated glob patterns applied below each root.
    #[builder(default = "DEFAULT_PATTERN.to_string()")]
    #[serde(default = "default_pattern")]
    pub pattern: String,

    /// Glob patterns excluded from enumeration.
    #[builder(default)]
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Accepted format identifiers (empty = any recognized format).
    #[builder(default)]
    #[serde(default)]
    pub format: Vec<String>,

    /// Extension overrides per format, in lookup order.
    #[builder(default)]
    #[serde(default)]
    pub formats_exts: IndexMap<String, Vec<String>>,

    /// Maximum file size, human readable (e.g. "100kb").
    #[builder(default = "DEFAULT_MAX_SIZE.to_string()")]
    #[serde(default = "default_max_size")]
    pub max_size: String,

    /// Minimum number of lines, inclusive.
    #[builder(default = "DEFAULT_MIN_LINES")]
    #[serde(default = "default_min_lines")]
    pub min_lines: usize,

    /// Maximum number of lines, inclusive.
    #[builder(default = "DEFAULT_MAX_LINES")]
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Skip symlinked roots and do not follow symlinks while walking.
    #[builder(default = "false")]
    #[serde(default)]
    pub no_symlinks: bool,

    /// Return absolute paths.
    #[builder(default = "false")]
    #[serde(default)]
    pub absolute: bool,

    /// Emit debug diagnostics.
    #[builder(default = "false")]
    #[serde(default)]
    pub debug: bool,

    /// Emit verbose diagnostics.
    #[builder(default = "false")]
    #[serde(default)]
    pub verbose: bool,
}

fn default_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_pattern() -> String {
    DEFAULT_PATTERN.to_string()
}

fn default_max_size() -> String {
    DEFAULT_MAX_SIZE.to_string()
}

fn default_min_lines() -> usize {
    DEFAULT_MIN_LINES
}

fn default_max_lines() -> usize {
    DEFAULT_MAX_LINES
}

impl FinderConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        match self.path {
            Some(ref paths) => check_paths(paths)?,
            None => return Err("At least one root path is required".to_string()),
        }
        let min = self.min_lines.unwrap_or(DEFAULT_MIN_LINES);
        let max = self.max_lines.unwrap_or(DEFAULT_MAX_LINES);
        check_line_bounds(min, max)
    }
}

fn check_paths(paths: &[PathBuf]) -> std::result::Result<(), String> {
    if paths.is_empty() {
        return Err("At least one root path is required".to_string());
    }
    if paths.iter().any(|p| p.as_os_str().is_empty()) {
        return Err("Root path cannot be empty".to_string());
    }
    Ok(())
}

fn check_line_bounds(min: usize, max: usize) -> std::result::Result<(), String> {
    if min > max {
        return Err(format!("minLines ({min}) is greater than maxLines ({max})"));
    }
    Ok(())
}

impl FinderConfig {
    /// Create a new finder config builder.
    pub fn builder() -> FinderConfigBuilder {
        FinderConfigBuilder::default()
    }

    /// Create a config with defaults for a single root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            path: vec![root.into()],
            pattern: default_pattern(),
            ignore: Vec::new(),
            format: Vec::new(),
            formats_exts: IndexMap::new(),
            max_size: default_max_size(),
            min_lines: DEFAULT_MIN_LINES,
            max_lines: DEFAULT_MAX_LINES,
            no_symlinks: false,
            absolute: false,
            debug: false,
            verbose: false,
        }
    }

    /// Parse a config from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| FinderError::Config { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file such as `.cpdfind.json`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| FinderError::read(path, e))?;
        Self::from_json_str(&json)
    }

    /// Check invariants that the builder enforces, for configs built any other way.
    pub fn validate(&self) -> Result<()> {
        check_paths(&self.path)
            .and_then(|()| check_line_bounds(self.min_lines, self.max_lines))
            .map_err(|message| FinderError::InvalidConfig { message })
    }

    /// Sub-patterns of `pattern`, in order. An empty pattern means the default.
    pub fn patterns(&self) -> Vec<&str> {
        let pattern = if self.pattern.is_empty() {
            DEFAULT_PATTERN
        } else {
            self.pattern.as_str()
        };
        pattern.split(',').collect()
    }

    /// The size limit in bytes.
    pub fn max_size_bytes(&self) -> Result<u64> {
        parse_size(&self.max_size)
    }

    /// Whether skip diagnostics of the verbose class should be emitted.
    pub fn reports_verbose(&self) -> bool {
        self.debug || self.verbose
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
