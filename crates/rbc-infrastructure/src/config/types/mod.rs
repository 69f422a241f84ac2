//! Configuration types module

pub mod app;
pub mod logging;
pub mod performance;
pub mod redis;

// Re-export main types
pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use performance::PerformanceConfig;
pub use redis::RedisConfig;
