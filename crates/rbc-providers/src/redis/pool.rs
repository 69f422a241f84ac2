//! Redis connection pool
//!
//! Wraps an `r2d2::Pool` of synchronous Redis connections behind the
//! `ConnectionPool` port. Releasing a connection returns it to r2d2's idle
//! set; discarding flags it broken first so r2d2 closes it instead.
//!
//! ## Example
//!
//! ```ignore
//! use rbc_providers::redis::{RedisConnectionPool, RedisPoolOptions};
//!
//! let pool = RedisConnectionPool::new(RedisPoolOptions {
//!     url: "redis://localhost:6379".to_string(),
//!     ..Default::default()
//! })?;
//! ```

use super::manager::{ConnectHealth, RedisConnection, RedisConnectionManager};
use rbc_domain::error::{Error, Result};
use rbc_domain::ports::{ConnectionPool, StoreConnection};
use rbc_domain::value_objects::PoolStats;
use redis::RedisError;
use std::ops::DerefMut;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Redis URL
pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Default maximum number of pooled connections
pub const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Default wait for a connection before acquisition fails
pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`RedisConnectionPool`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisPoolOptions {
    /// Redis URL (`redis://`, `rediss://` or `unix://`)
    pub url: String,
    /// Maximum number of connections, leased plus idle
    pub max_size: u32,
    /// Idle connections r2d2 keeps open; `None` keeps `max_size`
    pub min_idle: Option<u32>,
    /// Wait for a connection (pool exhaustion or connect) before failing
    pub connection_timeout: Duration,
    /// Socket read timeout; leave `None` so blocking pops can wait forever
    pub read_timeout: Option<Duration>,
    /// Socket write timeout
    pub write_timeout: Option<Duration>,
    /// PING each connection before handing it out
    pub test_on_acquire: bool,
}

impl Default for RedisPoolOptions {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_URL.to_string(),
            max_size: DEFAULT_POOL_MAX_SIZE,
            min_idle: None,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            read_timeout: None,
            write_timeout: None,
            test_on_acquire: false,
        }
    }
}

/// Routes r2d2 background connection errors to tracing
#[derive(Debug)]
struct TracingErrorHandler;

impl r2d2::HandleError<RedisError> for TracingErrorHandler {
    fn handle_error(&self, error: RedisError) {
        warn!(error = %error, "Redis pool failed to open a connection");
    }
}

/// A connection leased from [`RedisConnectionPool`]
#[derive(Debug)]
pub struct PooledRedisConnection(r2d2::PooledConnection<RedisConnectionManager>);

impl PooledRedisConnection {
    fn inner(&mut self) -> &mut RedisConnection {
        self.0.deref_mut()
    }
}

impl StoreConnection for PooledRedisConnection {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.inner().get(key)
    }

    fn set_ex(&mut self, key: &str, ttl_secs: i64, value: &str) -> Result<()> {
        self.inner().set_ex(key, ttl_secs, value)
    }

    fn expire(&mut self, key: &str, ttl_secs: i64) -> Result<bool> {
        self.inner().expire(key, ttl_secs)
    }

    fn ttl(&mut self, key: &str) -> Result<i64> {
        self.inner().ttl(key)
    }

    fn rpush(&mut self, list: &str, value: &str) -> Result<u64> {
        self.inner().rpush(list, value)
    }

    fn llen(&mut self, list: &str) -> Result<u64> {
        self.inner().llen(list)
    }

    fn blpop(&mut self, list: &str) -> Result<String> {
        self.inner().blpop(list)
    }
}

/// Redis-backed connection pool
pub struct RedisConnectionPool {
    pool: RwLock<Option<r2d2::Pool<RedisConnectionManager>>>,
    health: Arc<ConnectHealth>,
    address: String,
    acquired: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl RedisConnectionPool {
    /// Create a pool from `options`
    ///
    /// Connections are opened lazily, so an unreachable server only shows
    /// up as acquisition failures later. An unparsable URL fails here.
    pub fn new(options: RedisPoolOptions) -> Result<Self> {
        if options.max_size == 0 {
            return Err(Error::configuration("Redis pool max_size must be at least 1"));
        }
        if options.min_idle.is_some_and(|min| min > options.max_size) {
            return Err(Error::configuration(
                "Redis pool min_idle cannot exceed max_size",
            ));
        }

        let client = redis::Client::open(options.url.as_str()).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis URL: {e}"), e)
        })?;
        let manager = RedisConnectionManager::new(
            client,
            options.connection_timeout,
            options.read_timeout,
            options.write_timeout,
        );
        let health = manager.health();

        let pool = r2d2::Pool::builder()
            .max_size(options.max_size)
            .min_idle(options.min_idle)
            .connection_timeout(options.connection_timeout)
            .test_on_check_out(options.test_on_acquire)
            .error_handler(Box::new(TracingErrorHandler))
            .build_unchecked(manager);

        let address = redact_url(&options.url);
        info!(address = %address, max_size = options.max_size, "Redis pool created");

        Ok(Self {
            pool: RwLock::new(Some(pool)),
            health,
            address,
            acquired: AtomicU64::new(0),
            released: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        })
    }

    /// Create a pool for `url` with default settings
    pub fn with_url(url: &str) -> Result<Self> {
        Self::new(RedisPoolOptions {
            url: url.to_string(),
            ..Default::default()
        })
    }

    /// Server address with any password removed
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Classify a failed checkout
    ///
    /// A timeout while the last connect attempt could not reach the server is
    /// a connectivity failure; any other timeout means the pool is exhausted.
    fn checkout_failure(&self, err: r2d2::Error) -> Error {
        match self.health.last_failure() {
            Some(cause) => Error::connection_with_source(
                format!("Redis at {} is unreachable: {cause}", self.address),
                err,
            ),
            None => Error::acquisition_with_source(
                format!("Failed to get Redis connection from {}: {err}", self.address),
                err,
            ),
        }
    }

    fn current(&self) -> Option<r2d2::Pool<RedisConnectionManager>> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConnectionPool for RedisConnectionPool {
    type Connection = PooledRedisConnection;

    fn acquire(&self) -> Result<PooledRedisConnection> {
        let pool = self.current().ok_or(Error::PoolClosed)?;
        let connection = pool.get().map_err(|e| self.checkout_failure(e))?;
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(PooledRedisConnection(connection))
    }

    fn release(&self, connection: PooledRedisConnection) {
        self.released.fetch_add(1, Ordering::SeqCst);
        drop(connection);
    }

    fn discard(&self, mut connection: PooledRedisConnection) {
        connection.inner().mark_broken();
        self.discarded.fetch_add(1, Ordering::SeqCst);
        debug!(address = %self.address, "Discarding broken Redis connection");
        drop(connection);
    }

    fn shutdown(&self) {
        let closed = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if closed.is_some() {
            info!(address = %self.address, "Redis pool shut down");
        }
    }

    fn stats(&self) -> PoolStats {
        let (connections, idle_connections) = self
            .current()
            .map(|pool| {
                let state = pool.state();
                (state.connections, state.idle_connections)
            })
            .unwrap_or_default();
        PoolStats {
            connections,
            idle_connections,
            acquired: self.acquired.load(Ordering::SeqCst),
            released: self.released.load(Ordering::SeqCst),
            discarded: self.discarded.load(Ordering::SeqCst),
        }
    }

    fn pool_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConnectionPool")
            .field("address", &self.address)
            .field("stats", &self.stats())
            .finish()
    }
}

/// Hide the credentials part of a Redis URL
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host)) => format!("{scheme}://***@{host}"),
        None => url.to_string(),
    }
}
