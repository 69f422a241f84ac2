//! Redis store provider
//!
//! Synchronous Redis connections pooled by r2d2.
//!
//! ## Features
//!
//! - Lazy connection opening with bounded acquisition wait
//! - Broken connections are closed, never recycled
//! - Redis errors split into connectivity and command failures
//! - No socket read timeout by default, so blocking pops can wait forever

mod error;
mod manager;
mod pool;

pub use error::{classify, is_connection_error};
pub use manager::{ConnectHealth, RedisConnection, RedisConnectionManager};
pub use pool::{
    DEFAULT_CONNECTION_TIMEOUT, DEFAULT_POOL_MAX_SIZE, DEFAULT_REDIS_URL, PooledRedisConnection,
    RedisConnectionPool, RedisPoolOptions, redact_url,
};
