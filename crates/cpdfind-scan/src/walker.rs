//! Glob-driven file enumeration on top of jwalk.
//!
//! A glob expression is a root plus a sub-pattern. The literal leading
//! components of the sub-pattern select the directory to walk; the walk runs
//! serially in sorted order and every regular file whose path relative to the
//! root matches the sub-pattern is returned. Ignore patterns are matched
//! against the same relative paths, so they never apply to the root itself.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use jwalk::{Parallelism, WalkDir};

use cpdfind_core::{Entry, EntryStats, FinderError, Result};

use crate::expand::Expression;

/// Characters that start glob syntax in a path component.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Options controlling enumeration.
#[derive(Debug, Clone, Default)]
pub struct WalkOptions {
    /// Patterns, relative to each root, whose matches are never returned.
    pub ignore: Vec<String>,
    /// Return absolute paths.
    pub absolute: bool,
    /// Follow symbolic links to files and directories.
    pub follow_symlinks: bool,
}

/// Compiled ignore patterns.
#[derive(Debug)]
struct IgnoreSet {
    entries: GlobSet,
    /// `dir` for every `dir/**` pattern, so whole subtrees can be skipped.
    subtrees: GlobSet,
}

impl IgnoreSet {
    fn new(patterns: &[String]) -> Result<Self> {
        let mut entries = GlobSetBuilder::new();
        let mut subtrees = GlobSetBuilder::new();
        for pattern in patterns {
            entries.add(compile_glob(pattern)?);
            if let Some(dir) = pattern.strip_suffix("/**").filter(|dir| !dir.is_empty()) {
                subtrees.add(compile_glob(dir)?);
            }
        }

        let build = |builder: GlobSetBuilder| {
            builder.build().map_err(|e| FinderError::InvalidPattern {
                pattern: patterns.join(","),
                message: e.to_string(),
            })
        };

        Ok(Self {
            entries: build(entries)?,
            subtrees: build(subtrees)?,
        })
    }

    fn ignores(&self, relative: &Path) -> bool {
        self.entries.is_match(relative)
    }

    /// Whether nothing below the directory `relative` can be returned.
    fn prunes(&self, relative: &Path) -> bool {
        self.entries.is_match(relative) || self.subtrees.is_match(relative)
    }
}

/// Serial glob walker returning regular files, hidden ones included.
pub struct GlobWalker {
    ignore: Arc<IgnoreSet>,
    absolute: bool,
    follow_symlinks: bool,
}

impl GlobWalker {
    /// Create a walker, compiling the ignore patterns.
    pub fn new(options: &WalkOptions) -> Result<Self> {
        Ok(Self {
            ignore: Arc::new(IgnoreSet::new(&options.ignore)?),
            absolute: options.absolute,
            follow_symlinks: options.follow_symlinks,
        })
    }

    /// Enumerate all expressions in order, each path reported once.
    pub fn walk(&self, expressions: &[Expression]) -> Result<Vec<Entry>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for expression in expressions {
            let found = match expression {
                Expression::Literal(path) => self.literal(path)?.into_iter().collect(),
                Expression::Glob { root, pattern } => match split_pattern(pattern) {
                    Some((prefix, remainder)) => {
                        self.walk_glob(root, pattern, prefix, remainder)?
                    }
                    None if self.ignore.ignores(Path::new(pattern)) => Vec::new(),
                    None => self.literal(&root.join(pattern))?.into_iter().collect(),
                },
            };

            for entry in found {
                if seen.insert(entry.path.clone()) {
                    entries.push(entry);
                }
            }
        }

        Ok(entries)
    }

    /// Resolve a path without glob syntax; only regular files are kept.
    fn literal(&self, path: &Path) -> Result<Option<Entry>> {
        let metadata = if self.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        };

        match metadata {
            Ok(m) if m.file_type().is_file() => {
                let path = self.output_path(path.to_path_buf())?;
                Ok(Some(Entry::new(path, EntryStats::from_metadata(&m))))
            }
            _ => Ok(None),
        }
    }

    /// Walk `root/prefix` and collect files matching `pattern` below `root`.
    fn walk_glob(
        &self,
        root: &Path,
        pattern: &str,
        prefix: &str,
        remainder: &str,
    ) -> Result<Vec<Entry>> {
        let matcher = compile_matcher(pattern)?;
        let base = if prefix.is_empty() {
            root.to_path_buf()
        } else {
            root.join(prefix)
        };

        // Without `**` nothing deeper than the remainder can match.
        let max_depth = if remainder.contains("**") {
            usize::MAX
        } else {
            remainder.split('/').count()
        };

        tracing::trace!(root = %root.display(), pattern, base = %base.display(), "walking");

        let ignore = Arc::clone(&self.ignore);
        let walk_root = root.to_path_buf();
        let walker = WalkDir::new(&base)
            .parallelism(Parallelism::Serial)
            .sort(true)
            .skip_hidden(false)
            .follow_links(self.follow_symlinks)
            .max_depth(max_depth)
            .process_read_dir(move |depth, _path, _state, children| {
                // The base entry itself is never subject to ignore patterns.
                if depth.is_none() {
                    return;
                }
                children.retain(|child| match child {
                    Ok(entry) => {
                        !(entry.file_type().is_dir()
                            && ignore.prunes(relative_to(&entry.path(), &walk_root)))
                    }
                    Err(_) => true,
                });
            });

        let mut entries = Vec::new();
        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    tracing::warn!(path = %path.display(), "walk error: {err}");
                    continue;
                }
            };

            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = relative_to(&path, root);
            if !matcher.is_match(relative) || self.ignore.ignores(relative) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    tracing::warn!(path = %path.display(), "metadata error: {err}");
                    continue;
                }
            };

            let path = self.output_path(path)?;
            entries.push(Entry::new(path, EntryStats::from_metadata(&metadata)));
        }

        Ok(entries)
    }

    fn output_path(&self, path: PathBuf) -> Result<PathBuf> {
        if self.absolute && path.is_relative() {
            std::path::absolute(&path).map_err(|e| FinderError::resolve(path, e))
        } else {
            Ok(path)
        }
    }
}

/// Split a sub-pattern into its literal leading directories and the rest.
///
/// Returns `None` when the pattern contains no glob syntax.
pub fn split_pattern(pattern: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for component in pattern.split('/') {
        if component.contains(GLOB_META) {
            let prefix = pattern[..offset].trim_end_matches('/');
            return Some((prefix, &pattern[offset..]));
        }
        offset += component.len() + 1;
    }
    None
}

fn relative_to<'a>(path: &'a Path, root: &Path) -> &'a Path {
    path.strip_prefix(root).unwrap_or(path)
}

fn compile_glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| FinderError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

fn compile_matcher(pattern: &str) -> Result<GlobMatcher> {
    compile_glob(pattern).map(|glob| glob.compile_matcher())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();

        fs::write(root.join("top.js"), "a").unwrap();
        fs::write(root.join(".hidden.js"), "b").unwrap();
        fs::write(root.join("src/a.js"), "c").unwrap();
        fs::write(root.join("src/b.ts"), "d").unwrap();
        fs::write(root.join("src/nested/c.js"), "e").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "f").unwrap();

        temp
    }

    fn names(entries: &[Entry], root: &Path) -> Vec<String> {
        entries
            .iter()
            .map(|e| {
                e.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    fn ignoring(patterns: &[&str]) -> GlobWalker {
        GlobWalker::new(&WalkOptions {
            ignore: patterns.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_split_pattern() {
        assert_eq!(split_pattern("src/**/*.js"), Some(("src", "**/*.js")));
        assert_eq!(split_pattern("a/b/*.rs"), Some(("a/b", "*.rs")));
        assert_eq!(split_pattern("**/*"), Some(("", "**/*")));
        assert_eq!(split_pattern("src/{a,b}/x"), Some(("src", "{a,b}/x")));
        assert_eq!(split_pattern("src/a.js"), None);
    }

    #[test]
    fn test_walk_all_files_sorted_with_hidden() {
        let temp = create_test_tree();
        let walker = GlobWalker::new(&WalkOptions::default()).unwrap();

        let entries = walker.walk(&[Expression::glob(temp.path(), "**/*")]).unwrap();

        assert_eq!(
            names(&entries, temp.path()),
            vec![
                ".hidden.js",
                "node_modules/pkg/index.js",
                "src/a.js",
                "src/b.ts",
                "src/nested/c.js",
                "top.js",
            ]
        );
        assert!(entries.iter().all(|e| e.stats.kind.is_file()));
        assert_eq!(entries[0].stats.size, 1);
    }

    #[test]
    fn test_walk_respects_pattern_and_depth() {
        let temp = create_test_tree();
        let walker = GlobWalker::new(&WalkOptions::default()).unwrap();

        let entries = walker.walk(&[Expression::glob(temp.path(), "src/*.js")]).unwrap();
        assert_eq!(names(&entries, temp.path()), vec!["src/a.js"]);

        let entries = walker.walk(&[Expression::glob(temp.path(), "**/*.ts")]).unwrap();
        assert_eq!(names(&entries, temp.path()), vec!["src/b.ts"]);
    }

    #[test]
    fn test_walk_ignore_patterns() {
        let temp = create_test_tree();
        let walker = ignoring(&["**/node_modules/**", "**/.*"]);

        let entries = walker.walk(&[Expression::glob(temp.path(), "**/*.js")]).unwrap();

        assert_eq!(
            names(&entries, temp.path()),
            vec!["src/a.js", "src/nested/c.js", "top.js"]
        );
    }

    #[test]
    fn test_ignore_never_applies_to_the_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("home/.dotfiles");
        fs::create_dir_all(root.join("scripts")).unwrap();
        fs::write(root.join("scripts/setup.js"), "x").unwrap();
        fs::write(root.join(".profile.js"), "y").unwrap();

        let entries = ignoring(&["**/.*"])
            .walk(&[Expression::glob(&root, "**/*")])
            .unwrap();

        assert_eq!(names(&entries, &root), vec!["scripts/setup.js"]);
    }

    #[test]
    fn test_ignored_subtrees_are_pruned() {
        let ignore = IgnoreSet::new(&["**/node_modules/**".to_string(), "src/*".to_string()])
            .unwrap();

        assert!(ignore.prunes(Path::new("node_modules")));
        assert!(ignore.prunes(Path::new("a/node_modules")));
        assert!(!ignore.prunes(Path::new("a/node_modules_old")));
        assert!(ignore.ignores(Path::new("src/nested")));
        assert!(!ignore.ignores(Path::new("src/nested/c.js")));
    }

    #[test]
    fn test_matching_directory_prunes_its_subtree() {
        let temp = create_test_tree();

        let entries = ignoring(&["src/*"])
            .walk(&[Expression::glob(temp.path(), "**/*.js")])
            .unwrap();

        // src/nested/c.js matches no ignore pattern itself.
        assert_eq!(
            names(&entries, temp.path()),
            vec![".hidden.js", "node_modules/pkg/index.js", "top.js"]
        );
    }

    #[test]
    fn test_root_with_glob_characters_is_literal() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("app[v2]");
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("lib/a.js"), "x").unwrap();
        fs::write(temp.path().join("appv.js"), "y").unwrap();

        let entries = GlobWalker::new(&WalkOptions::default())
            .unwrap()
            .walk(&[Expression::glob(&root, "**/*.js")])
            .unwrap();

        assert_eq!(names(&entries, &root), vec!["lib/a.js"]);
    }

    #[test]
    fn test_walk_deduplicates_across_expressions() {
        let temp = create_test_tree();
        let walker = GlobWalker::new(&WalkOptions::default()).unwrap();

        let entries = walker
            .walk(&[
                Expression::glob(temp.path(), "src/*.js"),
                Expression::glob(temp.path(), "**/*.js"),
            ])
            .unwrap();

        let names = names(&entries, temp.path());
        assert_eq!(names[0], "src/a.js");
        assert_eq!(names.iter().filter(|n| *n == "src/a.js").count(), 1);
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_walk_literal_file() {
        let temp = create_test_tree();
        let walker = ignoring(&["**/*.ts"]);
        let file = temp.path().join("src/b.ts");

        let entries = walker
            .walk(&[
                Expression::Literal(file.clone()),
                Expression::Literal(temp.path().join("missing.js")),
                Expression::Literal(temp.path().join("src")),
            ])
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, file);
    }

    #[test]
    fn test_literal_file_with_glob_characters() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("[id].js");
        fs::write(&file, "x").unwrap();

        let entries = GlobWalker::new(&WalkOptions::default())
            .unwrap()
            .walk(&[Expression::Literal(file.clone())])
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, file);
    }

    #[test]
    fn test_pattern_without_glob_syntax() {
        let temp = create_test_tree();

        let entries = GlobWalker::new(&WalkOptions::default())
            .unwrap()
            .walk(&[Expression::glob(temp.path(), "src/a.js")])
            .unwrap();
        assert_eq!(names(&entries, temp.path()), vec!["src/a.js"]);

        let entries = ignoring(&["src/**"])
            .walk(&[Expression::glob(temp.path(), "src/a.js")])
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_walk_missing_base_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let walker = GlobWalker::new(&WalkOptions::default()).unwrap();

        let entries = walker
            .walk(&[Expression::glob(temp.path().join("gone"), "**/*")])
            .unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_invalid_ignore_pattern() {
        let result = GlobWalker::new(&WalkOptions {
            ignore: vec!["[".to_string()],
            ..Default::default()
        });
        assert!(matches!(result, Err(FinderError::InvalidPattern { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_follow_policy() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        fs::write(outside.path().join("linked.js"), "x").unwrap();
        fs::write(temp.path().join("own.js"), "y").unwrap();
        std::os::unix::fs::symlink(outside.path(), temp.path().join("link")).unwrap();

        let followed = GlobWalker::new(&WalkOptions {
            follow_symlinks: true,
            ..Default::default()
        })
        .unwrap()
        .walk(&[Expression::glob(temp.path(), "**/*.js")])
        .unwrap();
        assert_eq!(names(&followed, temp.path()), vec!["link/linked.js", "own.js"]);

        let unfollowed = GlobWalker::new(&WalkOptions::default())
            .unwrap()
            .walk(&[Expression::glob(temp.path(), "**/*.js")])
            .unwrap();
        assert_eq!(names(&unfollowed, temp.path()), vec!["own.js"]);
    }
}
