//! In-memory connection pool
//!
//! Hands out lightweight connections to a shared [`InMemoryStore`]. Keeps
//! real pool bookkeeping (idle connections are reused, discarded ones never
//! come back) and supports fault injection so the executor's failure paths
//! can be driven without a network.

use super::store::InMemoryStore;
use rbc_domain::error::{Error, Result};
use rbc_domain::ports::{ConnectionPool, StoreConnection};
use rbc_domain::value_objects::PoolStats;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Failure injected into the next command of a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The connection drops mid-command
    Connection,
    /// The store rejects the command
    Command,
}

/// A connection handed out by [`InMemoryPool`]
#[derive(Debug)]
pub struct InMemoryConnection {
    id: u64,
    store: Arc<InMemoryStore>,
    fault: Option<Fault>,
}

impl InMemoryConnection {
    /// Pool-unique connection identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    fn check(&mut self) -> Result<()> {
        match self.fault.take() {
            Some(Fault::Connection) => Err(Error::connection("Injected connection reset")),
            Some(Fault::Command) => Err(Error::command("ERR injected command failure")),
            None => Ok(()),
        }
    }
}

impl StoreConnection for InMemoryConnection {
    fn get(&mut self, key: &str) -> Result<Option<String>> {
        self.check()?;
        self.store.get(key)
    }

    fn set_ex(&mut self, key: &str, ttl_secs: i64, value: &str) -> Result<()> {
        self.check()?;
        self.store.set_ex(key, ttl_secs, value)
    }

    fn expire(&mut self, key: &str, ttl_secs: i64) -> Result<bool> {
        self.check()?;
        self.store.expire(key, ttl_secs)
    }

    fn ttl(&mut self, key: &str) -> Result<i64> {
        self.check()?;
        self.store.ttl(key)
    }

    fn rpush(&mut self, list: &str, value: &str) -> Result<u64> {
        self.check()?;
        self.store.rpush(list, value)
    }

    fn llen(&mut self, list: &str) -> Result<u64> {
        self.check()?;
        self.store.llen(list)
    }

    fn blpop(&mut self, list: &str) -> Result<String> {
        self.check()?;
        self.store.blpop(list)
    }
}

#[derive(Debug, Default)]
struct Bookkeeping {
    idle: Vec<u64>,
    faults: VecDeque<Fault>,
    outstanding: u32,
    next_id: u64,
}

/// Connection pool over an [`InMemoryStore`]
///
/// # Example
///
/// ```
/// use rbc_domain::ports::{ConnectionPool, StoreConnection};
/// use rbc_providers::InMemoryPool;
///
/// let pool = InMemoryPool::new();
/// let mut conn = pool.acquire().unwrap();
/// conn.rpush("crawl:queue", "https://example.com/robots.txt").unwrap();
/// pool.release(conn);
/// assert_eq!(pool.stats().idle_connections, 1);
/// ```
#[derive(Debug)]
pub struct InMemoryPool {
    store: Arc<InMemoryStore>,
    max_connections: Option<u32>,
    books: Mutex<Bookkeeping>,
    closed: AtomicBool,
    fail_next_acquire: AtomicBool,
    fail_next_connect: AtomicBool,
    acquired: AtomicU64,
    released: AtomicU64,
    discarded: AtomicU64,
}

impl InMemoryPool {
    /// Create a pool over a fresh store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()))
    }

    /// Create a pool over an existing store
    ///
    /// Shutting the pool down closes the store for everyone sharing it.
    pub fn with_store(store: Arc<InMemoryStore>) -> Self {
        Self {
            store,
            max_connections: None,
            books: Mutex::new(Bookkeeping::default()),
            closed: AtomicBool::new(false),
            fail_next_acquire: AtomicBool::new(false),
            fail_next_connect: AtomicBool::new(false),
            acquired: AtomicU64::new(0),
            released: AtomicU64::new(0),
            discarded: AtomicU64::new(0),
        }
    }

    /// Limit the number of simultaneously leased connections
    ///
    /// Acquiring beyond the limit fails immediately instead of waiting.
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    /// The backing store
    pub fn store(&self) -> &Arc<InMemoryStore> {
        &self.store
    }

    /// Make the first command of the next acquired connection fail
    ///
    /// Faults queue up; each acquisition consumes at most one.
    pub fn inject_fault(&self, fault: Fault) {
        self.books().faults.push_back(fault);
    }

    /// Make the next acquisition fail
    pub fn fail_next_acquire(&self) {
        self.fail_next_acquire.store(true, Ordering::SeqCst);
    }

    /// Make the next acquisition fail as if the store were unreachable
    pub fn fail_next_connect(&self) {
        self.fail_next_connect.store(true, Ordering::SeqCst);
    }

    fn books(&self) -> MutexGuard<'_, Bookkeeping> {
        self.books.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn give_back(&self, connection: InMemoryConnection, reusable: bool) {
        let mut books = self.books();
        books.outstanding = books.outstanding.saturating_sub(1);
        if reusable && !self.closed.load(Ordering::SeqCst) {
            books.idle.push(connection.id);
        }
    }
}

impl Default for InMemoryPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionPool for InMemoryPool {
    type Connection = InMemoryConnection;

    fn acquire(&self) -> Result<InMemoryConnection> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::PoolClosed);
        }
        if self.fail_next_acquire.swap(false, Ordering::SeqCst) {
            return Err(Error::acquisition("Injected acquisition failure"));
        }
        if self.fail_next_connect.swap(false, Ordering::SeqCst) {
            return Err(Error::connection("Injected connect failure: store unreachable"));
        }

        let mut books = self.books();
        if let Some(max) = self.max_connections {
            if books.outstanding >= max {
                return Err(Error::acquisition(format!(
                    "In-memory pool exhausted ({max} connections leased)"
                )));
            }
        }
        let id = match books.idle.pop() {
            Some(id) => id,
            None => {
                books.next_id += 1;
                books.next_id
            }
        };
        let fault = books.faults.pop_front();
        books.outstanding += 1;
        drop(books);

        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryConnection {
            id,
            store: Arc::clone(&self.store),
            fault,
        })
    }

    fn release(&self, connection: InMemoryConnection) {
        self.released.fetch_add(1, Ordering::SeqCst);
        self.give_back(connection, true);
    }

    fn discard(&self, connection: InMemoryConnection) {
        debug!(connection = connection.id, "Discarding in-memory connection");
        self.discarded.fetch_add(1, Ordering::SeqCst);
        self.give_back(connection, false);
    }

    fn shutdown(&self) {
        self.closed.store(true, Ordering::SeqCst);
        self.books().idle.clear();
        self.store.close();
    }

    fn stats(&self) -> PoolStats {
        let books = self.books();
        let idle = u32::try_from(books.idle.len()).unwrap_or(u32::MAX);
        PoolStats {
            connections: idle.saturating_add(books.outstanding),
            idle_connections: idle,
            acquired: self.acquired.load(Ordering::SeqCst),
            released: self.released.load(Ordering::SeqCst),
            discarded: self.discarded.load(Ordering::SeqCst),
        }
    }

    fn pool_name(&self) -> &str {
        "memory"
    }
}
