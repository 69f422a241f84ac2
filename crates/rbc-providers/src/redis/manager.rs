//! r2d2 connection manager for Redis
//!
//! Opens synchronous Redis connections with the configured socket timeouts.
//! A connection flagged as broken (or closed by the client library) is
//! reported to r2d2 through `has_broken`, so r2d2 drops it instead of putting
//! it back in the idle set.

use super::error::{classify, is_connection_error};
use rbc_domain::error::Result;
use rbc_domain::ports::StoreConnection;
use redis::{Client, ConnectionLike, FromRedisValue, RedisError};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Outcome of the most recent connect attempt
///
/// r2d2 only reports a timeout when it cannot hand out a connection; this
/// keeps the cause so an unreachable server can be told apart from an
/// exhausted pool.
#[derive(Debug, Default)]
pub struct ConnectHealth {
    last_failure: Mutex<Option<String>>,
}

impl ConnectHealth {
    /// Record a connect attempt; only connectivity errors are kept
    pub fn record(&self, failure: Option<&RedisError>) {
        let cause = failure
            .filter(|err| is_connection_error(err))
            .map(ToString::to_string);
        *self
            .last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = cause;
    }

    /// Why the last connect attempt could not reach the server, if it failed so
    pub fn last_failure(&self) -> Option<String> {
        self.last_failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// A raw Redis connection plus its broken flag
pub struct RedisConnection {
    inner: redis::Connection,
    broken: bool,
}

impl RedisConnection {
    /// Flag the connection so the pool never reuses it
    pub fn mark_broken(&mut self) {
        self.broken = true;
    }

    /// Whether the connection was flagged or closed underneath us
    pub fn is_broken(&self) -> bool {
        self.broken || !self.inner.is_open()
    }

    fn query<T: FromRedisValue>(&mut self, command: &str, cmd: &redis::Cmd) -> Result<T> {
        cmd.query(&mut self.inner).map_err(|err| {
            let err = classify(command, err);
            if err.is_connection_failure() {
                self.broken = true;
            }
            err
        })
    }
}

impl StoreConnection for RedisConnection {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.query("GET", redis::cmd("GET").arg(key))
    }

    fn set_ex(&mut self, key: &str, ttl_secs: i64, value: &str) -> Result<()> {
        self.query("SETEX", redis::cmd("SETEX").arg(key).arg(ttl_secs).arg(value))
    }

    fn expire(&mut self, key: &str, ttl_secs: i64) -> Result<bool> {
        let updated: i64 = self.query("EXPIRE", redis::cmd("EXPIRE").arg(key).arg(ttl_secs))?;
        Ok(updated == 1)
    }

    fn ttl(&mut self, key: &str) -> Result<i64> {
        self.query("TTL", redis::cmd("TTL").arg(key))
    }

    fn rpush(&mut self, list: &str, value: &str) -> Result<u64> {
        self.query("RPUSH", redis::cmd("RPUSH").arg(list).arg(value))
    }

    fn llen(&mut self, list: &str) -> Result<u64> {
        self.query("LLEN", redis::cmd("LLEN").arg(list))
    }

    fn blpop(&mut self, list: &str) -> Result<String> {
        let (_list, value): (String, String) = self.query(
            "BLPOP",
            redis::cmd("BLPOP")
                .arg(list)
                .arg(rbc_domain::constants::BLOCK_FOREVER),
        )?;
        Ok(value)
    }
}

impl std::fmt::Debug for RedisConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConnection")
            .field("broken", &self.broken)
            .finish_non_exhaustive()
    }
}

/// Creates and checks Redis connections for r2d2
#[derive(Debug)]
pub struct RedisConnectionManager {
    client: Client,
    connect_timeout: Duration,
    read_timeout: Option<Duration>,
    write_timeout: Option<Duration>,
    health: Arc<ConnectHealth>,
}

impl RedisConnectionManager {
    /// Create a manager for `client`
    ///
    /// `read_timeout` must stay `None` for connections that run blocking pops
    /// without a timeout, or the pop fails once the socket read times out.
    pub fn new(
        client: Client,
        connect_timeout: Duration,
        read_timeout: Option<Duration>,
        write_timeout: Option<Duration>,
    ) -> Self {
        Self {
            client,
            connect_timeout,
            read_timeout,
            write_timeout,
            health: Arc::default(),
        }
    }

    /// Connect outcomes shared with the pool
    pub fn health(&self) -> Arc<ConnectHealth> {
        Arc::clone(&self.health)
    }

    fn open(&self) -> std::result::Result<RedisConnection, RedisError> {
        let inner = self.client.get_connection_with_timeout(self.connect_timeout)?;
        inner.set_read_timeout(self.read_timeout)?;
        inner.set_write_timeout(self.write_timeout)?;
        Ok(RedisConnection {
            inner,
            broken: false,
        })
    }
}

impl r2d2::ManageConnection for RedisConnectionManager {
    type Connection = RedisConnection;
    type Error = RedisError;

    fn connect(&self) -> std::result::Result<RedisConnection, RedisError> {
        let connection = self.open();
        self.health.record(connection.as_ref().err());
        connection
    }

    fn is_valid(&self, conn: &mut RedisConnection) -> std::result::Result<(), RedisError> {
        redis::cmd("PING").query::<String>(&mut conn.inner).map(|_| ())
    }

    fn has_broken(&self, conn: &mut RedisConnection) -> bool {
        conn.is_broken()
    }
}
