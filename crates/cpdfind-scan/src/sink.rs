//! Diagnostic output for skipped files.
//!
//! The finder decides whether a skip is reported (from the `debug` and
//! `verbose` flags); a sink only decides where the message goes.

use std::path::Path;

use cpdfind_core::SkipReason;

/// Receives one call per reported skip.
pub trait DiagnosticSink {
    fn skipped(&self, path: &Path, reason: &SkipReason);
}

/// Emits skips as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn skipped(&self, path: &Path, reason: &SkipReason) {
        tracing::info!(path = %path.display(), "File {} skipped! {reason}", path.display());
    }
}

/// Discards all diagnostics.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn skipped(&self, _path: &Path, _reason: &SkipReason) {}
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Path, &SkipReason),
{
    fn skipped(&self, path: &Path, reason: &SkipReason) {
        self(path, reason)
    }
}
