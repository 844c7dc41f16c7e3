use std::path::PathBuf;

use outline_legacy::{DecodeError, Decoded};

#[derive(Debug)]
pub struct DecodeReport {
    pub file: PathBuf,
    pub decoded: Decoded,
    /// Set when the pass stopped before the end of the file.
    pub stopped: Option<StopInfo>,
}

#[derive(Debug)]
pub struct StopInfo {
    pub offset: usize,
    pub error: DecodeError,
}

impl DecodeReport {
    pub fn has_errors(&self) -> bool {
        self.stopped.is_some()
    }
}
