//! Pooled command execution
//!
//! Every store operation runs through [`CommandExecutor::execute`]: one
//! connection is leased from the pool, the operation runs against it, and the
//! connection goes back through exactly one return path before the call
//! returns.
//!
//! ## Failure handling
//!
//! | Failure | Return path | Caller sees |
//! |---------|-------------|-------------|
//! | Store unreachable while acquiring (`Connection`) | none, nothing was leased | `Ok(None)` |
//! | Acquisition (`Acquisition`, `PoolClosed`) | none, nothing was leased | `Err` |
//! | Connectivity (`Connection`) | discard | `Ok(None)` |
//! | Anything else from the operation | release | `Err` |
//! | Success | release | `Ok(Some(value))` |
//!
//! A swallowed connectivity failure and a logical miss both surface as
//! `Ok(None)`; callers cannot tell them apart.

use rbc_domain::error::{Error, Result};
use rbc_domain::ports::ConnectionPool;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

/// How a leased connection goes back to its pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Reusable: returned through [`ConnectionPool::release`]
    Healthy,
    /// Unusable: returned through [`ConnectionPool::discard`]
    Broken,
}

impl ReleaseOutcome {
    /// Pick the return path after an operation failed with `err`
    pub fn after_failure(err: &Error) -> Self {
        if err.is_connection_failure() {
            Self::Broken
        } else {
            Self::Healthy
        }
    }
}

/// A connection on loan from a pool
///
/// Dropping the lease releases the connection as healthy, so the connection
/// also goes back when an operation panics. [`finish`](Self::finish) picks
/// the return path explicitly.
pub struct ConnectionLease<'a, P: ConnectionPool> {
    pool: &'a P,
    connection: Option<P::Connection>,
}

impl<'a, P: ConnectionPool> ConnectionLease<'a, P> {
    /// Acquire a connection from `pool`
    pub fn acquire(pool: &'a P) -> Result<Self> {
        let connection = pool.acquire()?;
        Ok(Self {
            pool,
            connection: Some(connection),
        })
    }

    /// Run `operation` against the leased connection
    pub fn run<T, F>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut P::Connection) -> Result<T>,
    {
        match self.connection.as_mut() {
            Some(connection) => operation(connection),
            None => Err(Error::internal("connection lease already finished")),
        }
    }

    /// Hand the connection back through the path named by `outcome`
    pub fn finish(mut self, outcome: ReleaseOutcome) {
        if let Some(connection) = self.connection.take() {
            match outcome {
                ReleaseOutcome::Healthy => self.pool.release(connection),
                ReleaseOutcome::Broken => self.pool.discard(connection),
            }
        }
    }
}

impl<P: ConnectionPool> Drop for ConnectionLease<'_, P> {
    fn drop(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.pool.release(connection);
        }
    }
}

/// Executes operations against pooled store connections
///
/// Stateless apart from the shared pool handle; clone it freely and call it
/// from any number of threads. Each call leases its own connection and no
/// lock is held across a remote call.
pub struct CommandExecutor<P: ConnectionPool> {
    pool: Arc<P>,
}

impl<P: ConnectionPool> CommandExecutor<P> {
    /// Create an executor over `pool`
    pub fn new(pool: Arc<P>) -> Self {
        Self { pool }
    }

    /// The underlying pool
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// Run `operation` against one pooled connection
    ///
    /// See the [module documentation](self) for the failure contract.
    pub fn execute<T, F>(&self, operation: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut P::Connection) -> Result<T>,
    {
        let mut lease = match ConnectionLease::acquire(self.pool.as_ref()) {
            Ok(lease) => lease,
            Err(err) if err.is_connection_failure() => {
                error!(
                    pool = self.pool.pool_name(),
                    error = %err,
                    "Store unreachable, no connection acquired"
                );
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        match lease.run(operation) {
            Ok(value) => {
                lease.finish(ReleaseOutcome::Healthy);
                Ok(Some(value))
            }
            Err(err) => {
                let outcome = ReleaseOutcome::after_failure(&err);
                lease.finish(outcome);
                if outcome == ReleaseOutcome::Broken {
                    error!(
                        pool = self.pool.pool_name(),
                        error = %err,
                        "Store connection failure, connection discarded"
                    );
                    return Ok(None);
                }
                debug!(pool = self.pool.pool_name(), error = %err, "Store operation failed");
                Err(err)
            }
        }
    }

    /// Run an operation that produces no value
    pub fn execute_void<F>(&self, operation: F) -> Result<()>
    where
        F: FnOnce(&mut P::Connection) -> Result<()>,
    {
        self.execute(operation).map(|_| ())
    }

    /// Shut the underlying pool down
    pub fn shutdown(&self) {
        self.pool.shutdown();
    }
}

impl<P: ConnectionPool> Clone for CommandExecutor<P> {
    fn clone(&self) -> Self {
        Self {
            pool: Arc::clone(&self.pool),
        }
    }
}

impl<P: ConnectionPool> fmt::Debug for CommandExecutor<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandExecutor")
            .field("pool", &self.pool.pool_name())
            .field("stats", &self.pool.stats())
            .finish()
    }
}
