//! The discovery pipeline: roots to filtered, content-loaded files.

use std::path::Path;

use cpdfind_core::{EntryWithContent, FinderConfig, Result, SkipReason};

use crate::expand::{expand_patterns, retain_roots};
use crate::filter::FilterChain;
use crate::loader::load;
use crate::sink::{DiagnosticSink, TracingSink};
use crate::walker::{GlobWalker, WalkOptions};

/// Selects and loads the files a duplicate detector should inspect.
///
/// A run either returns every selected file or fails as a whole; there is
/// no partial result. Output order is enumeration order.
pub struct FileFinder<S = TracingSink> {
    sink: S,
}

impl FileFinder<TracingSink> {
    /// Create a finder that reports skips through `tracing`.
    pub fn new() -> Self {
        Self { sink: TracingSink }
    }
}

impl Default for FileFinder<TracingSink> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DiagnosticSink> FileFinder<S> {
    /// Create a finder with a custom diagnostic sink.
    pub fn with_sink(sink: S) -> Self {
        Self { sink }
    }

    /// Run the pipeline for `config`.
    pub fn find(&self, config: &FinderConfig) -> Result<Vec<EntryWithContent>> {
        config.validate()?;
        let chain = FilterChain::from_config(config)?;

        let roots = retain_roots(&config.path, config.no_symlinks);
        let expressions = expand_patterns(&roots, &config.patterns())?;

        let walker = GlobWalker::new(&WalkOptions {
            ignore: config.ignore.clone(),
            absolute: config.absolute,
            follow_symlinks: !config.no_symlinks,
        })?;
        let candidates = walker.walk(&expressions)?;

        tracing::debug!(
            roots = roots.len(),
            expressions = expressions.len(),
            candidates = candidates.len(),
            "enumerated candidates"
        );

        let mut files = Vec::with_capacity(candidates.len());
        for entry in candidates {
            if let Some(reason) = chain.rejects_entry(&entry) {
                self.report(config, &entry.path, &reason);
                continue;
            }

            let entry = load(entry)?;
            if let Some(reason) = chain.rejects_content(&entry) {
                self.report(config, &entry.path, &reason);
                continue;
            }

            files.push(entry);
        }

        tracing::debug!(files = files.len(), "selected files");
        Ok(files)
    }

    fn report(&self, config: &FinderConfig, path: &Path, reason: &SkipReason) {
        if config.debug || (config.reports_verbose() && reason.shown_when_verbose()) {
            self.sink.skipped(path, reason);
        }
    }
}

/// Select and load files for `config`, reporting skips through `tracing`.
pub fn get_files_to_detect(config: &FinderConfig) -> Result<Vec<EntryWithContent>> {
    FileFinder::new().find(config)
}
