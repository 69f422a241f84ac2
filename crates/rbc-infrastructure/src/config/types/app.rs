//! Application configuration root

use super::{LoggingConfig, PerformanceConfig, RedisConfig};
use serde::{Deserialize, Serialize};

/// Root configuration
///
/// TOML layout:
///
/// ```toml
/// [redis]
/// url = "redis://cache.internal:6379"
/// pool_max_size = 16
///
/// [logging]
/// level = "debug"
///
/// [performance]
/// enabled = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Redis connection pool settings
    pub redis: RedisConfig,
    /// Logging settings
    pub logging: LoggingConfig,
    /// Performance logging settings
    pub performance: PerformanceConfig,
}
