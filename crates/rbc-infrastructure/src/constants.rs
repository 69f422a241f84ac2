//! Infrastructure layer constants
//!
//! Domain-specific constants are defined in `rbc_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "rbc.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "rbc";

/// Environment variable prefix for configuration (`RBC__REDIS__URL`, ...)
pub const CONFIG_ENV_PREFIX: &str = "RBC";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// REDIS CONSTANTS
// ============================================================================

/// Default Redis connection pool size
pub const REDIS_POOL_SIZE: u32 = 8;

/// Default wait for a pooled connection, in milliseconds
pub const REDIS_CONNECTION_TIMEOUT_MS: u64 = 5_000;

/// URL schemes accepted for the Redis URL
pub const REDIS_URL_SCHEMES: &[&str] = &["redis://", "rediss://", "unix://", "redis+unix://"];

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "RBC_LOG";

/// Default log file stem when file output has none
pub const DEFAULT_LOG_FILE_STEM: &str = "rbc";
