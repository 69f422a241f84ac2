//! Connection Pool Port
//!
//! Supplies connections and takes them back. The pool owns all concurrency
//! control (maximum size, waiting on exhaustion); callers only hand
//! connections back through one of the two return paths.

use crate::error::Result;
use crate::ports::store::StoreConnection;
use crate::value_objects::PoolStats;

/// Pool of connections to the remote store
///
/// # Example
///
/// ```ignore
/// let mut conn = pool.acquire()?;
/// match conn.get("robots:example.com") {
///     Err(e) if e.is_connection_failure() => pool.discard(conn),
///     _ => pool.release(conn),
/// }
/// ```
pub trait ConnectionPool: Send + Sync {
    /// Connection type handed out by this pool
    type Connection: StoreConnection;

    /// Take a connection from the pool
    ///
    /// Fails with [`Error::Connection`](crate::error::Error::Connection) when
    /// the store cannot be reached, with
    /// [`Error::Acquisition`](crate::error::Error::Acquisition) when no
    /// connection can be supplied otherwise (exhaustion) and with
    /// [`Error::PoolClosed`](crate::error::Error::PoolClosed) after
    /// [`shutdown`](Self::shutdown).
    fn acquire(&self) -> Result<Self::Connection>;

    /// Return a healthy connection for reuse
    fn release(&self, connection: Self::Connection);

    /// Return a connection known to be broken so it is never reused
    fn discard(&self, connection: Self::Connection);

    /// Shut the pool down; later acquisitions fail
    fn shutdown(&self);

    /// Current pool statistics
    fn stats(&self) -> PoolStats;

    /// Name of this pool implementation (e.g., "redis", "memory")
    fn pool_name(&self) -> &str;
}
