//! Decoder configuration.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Options for decoding a legacy outline.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Treat the first recoverable diagnostic as fatal.
    pub strict: bool,
    /// Collect a [`RecordTrace`](crate::RecordTrace) entry per record.
    pub trace_records: bool,
    /// Maximum number of diagnostics kept; further ones are only counted.
    pub max_diagnostics: Option<usize>,
    /// Raised by the caller to stop the pass between two records.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl DecodeOptions {
    /// Create decode options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict mode.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Collect a per-record trace.
    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.trace_records = true;
        self
    }

    /// Cap the stored diagnostics list.
    #[must_use]
    pub fn with_max_diagnostics(mut self, max: usize) -> Self {
        self.max_diagnostics = Some(max);
        self
    }

    /// Check `flag` once per record and stop when it is set.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
