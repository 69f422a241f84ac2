//! Redis configuration types

use crate::constants::{REDIS_CONNECTION_TIMEOUT_MS, REDIS_POOL_SIZE};
use rbc_providers::redis::{DEFAULT_REDIS_URL, RedisPoolOptions};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Redis connection pool configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,

    /// Maximum number of pooled connections
    pub pool_max_size: u32,

    /// Idle connections kept open (defaults to `pool_max_size`)
    pub pool_min_idle: Option<u32>,

    /// Wait for a pooled connection before failing, in milliseconds
    pub connection_timeout_ms: u64,

    /// Socket read timeout in milliseconds
    ///
    /// Leave unset when the queue pop is used: it blocks without a timeout
    /// and a read timeout would turn every idle wait into a failure.
    pub read_timeout_ms: Option<u64>,

    /// Socket write timeout in milliseconds
    pub write_timeout_ms: Option<u64>,

    /// PING connections before handing them out
    pub test_on_acquire: bool,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            pool_max_size: REDIS_POOL_SIZE,
            pool_min_idle: None,
            connection_timeout_ms: REDIS_CONNECTION_TIMEOUT_MS,
            read_timeout_ms: None,
            write_timeout_ms: None,
            test_on_acquire: false,
        }
    }
}

impl RedisConfig {
    /// Pool options for the Redis provider
    pub fn pool_options(&self) -> RedisPoolOptions {
        RedisPoolOptions {
            url: self.url.clone(),
            max_size: self.pool_max_size,
            min_idle: self.pool_min_idle,
            connection_timeout: Duration::from_millis(self.connection_timeout_ms),
            read_timeout: self.read_timeout_ms.map(Duration::from_millis),
            write_timeout: self.write_timeout_ms.map(Duration::from_millis),
            test_on_acquire: self.test_on_acquire,
        }
    }
}
