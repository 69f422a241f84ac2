//! # Robots Cache - Provider Implementations
//!
//! Implementations of the ports defined in `rbc-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Pool | `ConnectionPool` | Redis (r2d2), InMemory |
//! | Store | `StoreConnection` | Redis, InMemory |
//! | Performance | `PerformanceLogger` | Tracing, Null |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! rbc-providers = { version = "0.1", default-features = false }
//! ```
//!
//! Without `cache-redis` only the in-memory pool and the performance loggers
//! are built.

// Re-export rbc-domain types commonly used with providers
pub use rbc_domain::error::{Error, Result};
pub use rbc_domain::ports::{ConnectionPool, PerformanceLogger, StoreConnection};

/// In-process store and pool
///
/// Emulates the store commands for development and tests.
pub mod memory;

/// Performance logger implementations
pub mod perf;

/// Redis connection pool
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use memory::{Fault, InMemoryConnection, InMemoryPool, InMemoryStore};
pub use perf::{NullPerformanceLogger, TracingPerformanceLogger};
#[cfg(feature = "cache-redis")]
pub use redis::{RedisConnectionPool, RedisPoolOptions};
