//! Enumeration expressions built from root paths and patterns.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use cpdfind_core::{FinderError, Result};

use crate::path::{is_file, is_symlink};

/// One unit of enumeration work.
///
/// Roots are never parsed as glob syntax; only the sub-pattern is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A resolved file root, enumerated as-is.
    Literal(PathBuf),
    /// A sub-pattern matched against paths relative to `root`.
    Glob { root: PathBuf, pattern: String },
}

impl Expression {
    /// Create a glob expression, dropping any leading `./` from the pattern.
    pub fn glob(root: impl Into<PathBuf>, pattern: &str) -> Self {
        let mut pattern = pattern;
        while let Some(rest) = pattern.strip_prefix("./") {
            pattern = rest;
        }
        Self::Glob {
            root: root.into(),
            pattern: pattern.to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(path) => write!(f, "{}", path.display()),
            Self::Glob { root, pattern } => {
                f.write_str(&join_pattern(&root.to_string_lossy(), pattern))
            }
        }
    }
}

/// Drop symlinked roots when symlinks are disabled; keep order otherwise.
pub fn retain_roots(roots: &[PathBuf], no_symlinks: bool) -> Vec<&Path> {
    roots
        .iter()
        .map(PathBuf::as_path)
        .filter(|root| !(no_symlinks && is_symlink(root)))
        .collect()
}

/// Build the enumeration expressions for a set of roots.
///
/// Every root must resolve to a real path. A root that resolves to a regular
/// file contributes its resolved path as a literal expression first; then
/// every root contributes one expression per sub-pattern.
pub fn expand_patterns(roots: &[&Path], patterns: &[&str]) -> Result<Vec<Expression>> {
    let mut expressions = Vec::with_capacity(roots.len() * (patterns.len() + 1));

    for root in roots {
        let resolved = fs::canonicalize(root).map_err(|e| FinderError::resolve(*root, e))?;

        if is_file(&resolved) {
            expressions.push(Expression::Literal(resolved));
        }

        for pattern in patterns {
            expressions.push(Expression::glob(*root, pattern));
        }
    }

    Ok(expressions)
}

/// Join a root and a sub-pattern into a single glob with one `/`.
///
/// Glob syntax in the root is escaped so it only matches itself.
pub fn join_pattern(root: &str, pattern: &str) -> String {
    let root = globset::escape(root);
    if root.ends_with('/') {
        format!("{root}{pattern}")
    } else {
        format!("{root}/{pattern}")
    }
}
