//! Null performance logger

use rbc_domain::ports::PerformanceLogger;
use std::time::Duration;

/// Performance logger that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPerformanceLogger;

impl NullPerformanceLogger {
    /// Create a new null logger
    pub fn new() -> Self {
        Self
    }
}

impl PerformanceLogger for NullPerformanceLogger {
    fn note_elapsed(&self, _operation: &str, _elapsed: Duration, _annotation: &str) {}
}
