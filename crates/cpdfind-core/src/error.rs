//! Error types for file discovery.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used throughout cpdfind.
pub type Result<T> = std::result::Result<T, FinderError>;

/// Fatal errors that abort a discovery run.
#[derive(Debug, Error)]
pub enum FinderError {
    /// A root path could not be resolved to a real path.
    #[error("Cannot resolve root path {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A glob pattern failed to compile.
    #[error("Invalid glob pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A size string could not be parsed.
    #[error("Invalid size `{value}`")]
    InvalidSize { value: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Malformed configuration document.
    #[error("Malformed configuration: {source}")]
    Config {
        #[source]
        source: serde_json::Error,
    },
}

impl FinderError {
    /// Create a root resolution error with path context.
    pub fn resolve(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Resolve {
            path: path.into(),
            source,
        }
    }

    /// Create a read error with path context.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Path the error refers to, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Resolve { path, .. } | Self::Read { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Why a candidate file was left out. Skips are expected, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// No format recognized, or the format is not accepted.
    UnsupportedFormat { format: Option<String> },
    /// File is larger than the size limit.
    TooLarge { size: u64, limit: u64 },
    /// Line count falls outside the configured bounds.
    LinesOutOfRange { lines: usize, min: usize, max: usize },
}

impl SkipReason {
    /// Whether this skip is reported with only the `verbose` flag set.
    ///
    /// Size skips are reported under `debug` alone.
    pub fn shown_when_verbose(&self) -> bool {
        !matches!(self, Self::TooLarge { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat { format } => write!(
                f,
                "Format \"{}\" is not among the supported formats.",
                format.as_deref().unwrap_or("")
            ),
            Self::TooLarge { size, limit } => write!(
                f,
                "Size more than limit ({} > {}).",
                humansize::format_size(*size, humansize::BINARY),
                humansize::format_size(*limit, humansize::BINARY)
            ),
            Self::LinesOutOfRange { lines, min, max } => {
                write!(f, "Code lines={lines} not in limits ({min}:{max}).")
            }
        }
    }
}
