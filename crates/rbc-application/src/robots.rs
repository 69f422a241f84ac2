//! robots.txt cache and crawl queue operations
//!
//! Thin operations over [`CommandExecutor`]. Each public method uses a single
//! pooled connection for all of its remote calls; none of them is wrapped in
//! a remote transaction.

use crate::executor::CommandExecutor;
use rbc_domain::constants::{CACHE_HIT_PREFIX, CACHE_MISS_PREFIX, GET_TTL_OPERATION};
use rbc_domain::error::Result;
use rbc_domain::ports::{ConnectionPool, PerformanceLogger, StoreConnection};
use rbc_domain::value_objects::{CachedEntry, PoolStats};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// robots.txt cache and crawl queue access
///
/// Connectivity failures are logged and turned into empty results by the
/// executor. `Ok(None)` from a read therefore means "nothing found" or
/// "store unreachable".
pub struct RobotsStore<P: ConnectionPool> {
    executor: CommandExecutor<P>,
    perf: Arc<dyn PerformanceLogger>,
}

impl<P: ConnectionPool> RobotsStore<P> {
    /// Create a store over `pool`, reporting read timings to `perf`
    pub fn new(pool: Arc<P>, perf: Arc<dyn PerformanceLogger>) -> Self {
        Self {
            executor: CommandExecutor::new(pool),
            perf,
        }
    }

    /// The executor every operation runs through
    pub fn executor(&self) -> &CommandExecutor<P> {
        &self.executor
    }

    /// Statistics of the underlying pool
    pub fn pool_stats(&self) -> PoolStats {
        self.executor.pool().stats()
    }

    /// Read a cached entry and its remaining TTL
    ///
    /// A missing key returns `Ok(None)` after a single GET. The whole read is
    /// timed and reported as a hit or a miss.
    pub fn get_value(&self, key: &str) -> Result<Option<CachedEntry>> {
        let started = Instant::now();

        let entry = self
            .executor
            .execute(|conn| {
                let Some(value) = conn.get(key)? else {
                    return Ok(None);
                };
                let ttl_secs = conn.ttl(key)?;
                Ok(Some(CachedEntry::new(value, ttl_secs)))
            })?
            .flatten();

        let prefix = if entry.is_some() {
            CACHE_HIT_PREFIX
        } else {
            CACHE_MISS_PREFIX
        };
        self.perf.note_elapsed(
            GET_TTL_OPERATION,
            started.elapsed(),
            &format!("{prefix}{key}"),
        );

        Ok(entry)
    }

    /// Write or touch a cached entry
    ///
    /// With a value the key is set together with its expiry, overwriting any
    /// previous value. Without a value only the expiry of an existing key is
    /// refreshed; a missing key stays missing.
    pub fn update_value(&self, key: &str, entry: &CachedEntry) -> Result<()> {
        self.executor.execute_void(|conn| {
            match entry.value() {
                Some(value) => conn.set_ex(key, entry.ttl_secs, value)?,
                None => {
                    let existed = conn.expire(key, entry.ttl_secs)?;
                    debug!(key, existed, ttl_secs = entry.ttl_secs, "Expiry refreshed");
                }
            }
            Ok(())
        })
    }

    /// Append `key` to the tail of `list`
    pub fn push_key(&self, list: &str, key: &str) -> Result<()> {
        self.executor.execute_void(|conn| {
            conn.rpush(list, key)?;
            Ok(())
        })
    }

    /// Append `key` to `list` unless the list already holds `max_len` entries
    ///
    /// A list holding exactly `max_len` entries is full. This is stricter
    /// than an inclusive `len <= max_len` check, which would let the list
    /// grow to `max_len + 1`.
    ///
    /// The length check and the append are two separate commands. Concurrent
    /// pushers can both pass the check, so `max_len` is a soft cap.
    pub fn push_key_bounded(&self, list: &str, key: &str, max_len: u64) -> Result<()> {
        self.executor.execute_void(|conn| {
            let len = conn.llen(list)?;
            if len < max_len {
                conn.rpush(list, key)?;
            } else {
                debug!(list, len, max_len, "Queue full, key dropped");
            }
            Ok(())
        })
    }

    /// Remove and return the head of `list`, waiting as long as it takes
    ///
    /// Blocks the calling thread until an element is available. There is no
    /// timeout or cancellation here; wrap the call (see
    /// [`AsyncRobotsStore`](crate::AsyncRobotsStore)) when one is needed.
    pub fn pop_key(&self, list: &str) -> Result<Option<String>> {
        self.executor.execute(|conn| conn.blpop(list))
    }

    /// Shut the connection pool down
    ///
    /// Terminal: every later call fails to acquire a connection.
    pub fn close(&self) {
        info!(pool = self.executor.pool().pool_name(), "Closing robots store");
        self.executor.shutdown();
    }
}

impl<P: ConnectionPool> Clone for RobotsStore<P> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            perf: Arc::clone(&self.perf),
        }
    }
}

impl<P: ConnectionPool> fmt::Debug for RobotsStore<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotsStore")
            .field("executor", &self.executor)
            .field("perf", &self.perf)
            .finish()
    }
}
