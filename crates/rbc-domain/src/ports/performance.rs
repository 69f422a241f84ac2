//! Performance Logging Port

use std::time::Duration;

/// Sink for elapsed-time measurements
///
/// Purely observational: implementations must not fail or panic, and the
/// method returns nothing so a broken sink can never change the result of
/// the operation being measured.
pub trait PerformanceLogger: Send + Sync + std::fmt::Debug {
    /// Record that `operation` took `elapsed`, with a free-form annotation
    fn note_elapsed(&self, operation: &str, elapsed: Duration, annotation: &str);
}
