use std::ffi::OsString;
use std::time::Duration;

use crate::convert::DEFAULT_PROGRAM;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on the playlist download.
    pub timeout: Duration,
    /// Program used to remux the clipped playlist.
    pub converter_program: OsString,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            converter_program: DEFAULT_PROGRAM.into(),
        }
    }
}

impl PipelineConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;

        self
    }

    pub fn with_converter_program(mut self, program: impl Into<OsString>) -> Self {
        self.converter_program = program.into();

        self
    }
}
