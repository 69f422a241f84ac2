//! Store bootstrap
//!
//! Wires a connection pool and a performance logger into a ready
//! [`RobotsStore`].

use crate::config::{AppConfig, PerformanceConfig};
use rbc_application::{AsyncRobotsStore, RobotsStore};
use rbc_domain::error::Result;
use rbc_domain::ports::PerformanceLogger;
use rbc_providers::{
    InMemoryPool, NullPerformanceLogger, RedisConnectionPool, TracingPerformanceLogger,
};
use std::sync::Arc;
use tracing::info;

/// Builds robots stores from configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct RobotsStoreFactory;

impl RobotsStoreFactory {
    /// Build a Redis-backed store from `config`
    ///
    /// The pool opens connections lazily; an unreachable server surfaces as
    /// acquisition errors from the store operations.
    pub fn create_from_config(config: &AppConfig) -> Result<RobotsStore<RedisConnectionPool>> {
        let pool = RedisConnectionPool::new(config.redis.pool_options())?;
        info!(
            address = pool.address(),
            performance = config.performance.enabled,
            "Robots store ready"
        );
        Ok(RobotsStore::new(
            Arc::new(pool),
            Self::performance_logger(&config.performance),
        ))
    }

    /// Build a Redis-backed store for async callers
    pub fn create_async_from_config(
        config: &AppConfig,
    ) -> Result<AsyncRobotsStore<RedisConnectionPool>> {
        Self::create_from_config(config).map(AsyncRobotsStore::new)
    }

    /// Build a store over a fresh in-process pool
    pub fn create_in_memory() -> RobotsStore<InMemoryPool> {
        RobotsStore::new(
            Arc::new(InMemoryPool::new()),
            Arc::new(TracingPerformanceLogger::new()),
        )
    }

    /// Performance logger selected by `config`
    pub fn performance_logger(config: &PerformanceConfig) -> Arc<dyn PerformanceLogger> {
        if config.enabled {
            Arc::new(TracingPerformanceLogger::new())
        } else {
            Arc::new(NullPerformanceLogger::new())
        }
    }
}
