//! Performance logger implementations
//!
//! | Logger | Description |
//! |--------|-------------|
//! | [`TracingPerformanceLogger`] | Emits one `tracing` event per measurement |
//! | [`NullPerformanceLogger`] | Drops every measurement |

mod null;
mod tracing_logger;

pub use tracing_logger::{PERFORMANCE_TARGET, TracingPerformanceLogger};
pub use null::NullPerformanceLogger;
