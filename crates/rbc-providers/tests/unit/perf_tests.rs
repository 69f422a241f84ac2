//! Performance logger tests

use rbc_domain::ports::PerformanceLogger;
use rbc_providers::perf::PERFORMANCE_TARGET;
use rbc_providers::{NullPerformanceLogger, TracingPerformanceLogger};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_loggers_are_usable_as_trait_objects() {
    let loggers: Vec<Arc<dyn PerformanceLogger>> = vec![
        Arc::new(NullPerformanceLogger::new()),
        Arc::new(TracingPerformanceLogger::new()),
    ];

    for logger in loggers {
        logger.note_elapsed("RedisGetTTL", Duration::from_millis(3), "REDIS HIT: k");
    }
}

#[test]
fn test_performance_target() {
    assert_eq!(PERFORMANCE_TARGET, "rbc::performance");
}
