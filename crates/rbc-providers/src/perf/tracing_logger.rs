//! Tracing-backed performance logger

use rbc_domain::ports::PerformanceLogger;
use std::time::Duration;

/// Target of the events emitted by [`TracingPerformanceLogger`]
///
/// Filter on it to route measurements separately, e.g.
/// `RBC_LOG=info,rbc::performance=off`.
pub const PERFORMANCE_TARGET: &str = "rbc::performance";

/// Emits each measurement as an `info` event on [`PERFORMANCE_TARGET`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingPerformanceLogger;

impl TracingPerformanceLogger {
    /// Create a new tracing logger
    pub fn new() -> Self {
        Self
    }
}

impl PerformanceLogger for TracingPerformanceLogger {
    fn note_elapsed(&self, operation: &str, elapsed: Duration, annotation: &str) {
        tracing::info!(
            target: PERFORMANCE_TARGET,
            operation,
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            annotation,
            "Elapsed"
        );
    }
}
