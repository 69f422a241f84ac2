//! Tokio facade over [`RobotsStore`]
//!
//! Store operations block their thread (a queue pop may block forever), so
//! async callers must not run them on a runtime worker. This facade moves
//! each call onto `tokio::task::spawn_blocking`, which also lets callers put
//! a `tokio::time::timeout` around [`AsyncRobotsStore::pop_key`].
//!
//! Dropping a pending future does not cancel the blocking call underneath;
//! the pop still completes on the blocking pool and its result is dropped.

use crate::robots::RobotsStore;
use rbc_domain::error::{Error, Result};
use rbc_domain::ports::ConnectionPool;
use rbc_domain::value_objects::{CachedEntry, PoolStats};
use std::sync::Arc;

/// Async access to a [`RobotsStore`]
pub struct AsyncRobotsStore<P: ConnectionPool + 'static> {
    inner: Arc<RobotsStore<P>>,
}

impl<P: ConnectionPool + 'static> AsyncRobotsStore<P> {
    /// Wrap a store
    pub fn new(store: RobotsStore<P>) -> Self {
        Self {
            inner: Arc::new(store),
        }
    }

    /// The wrapped store
    pub fn blocking(&self) -> &RobotsStore<P> {
        &self.inner
    }

    /// See [`RobotsStore::get_value`]
    pub async fn get_value(&self, key: impl Into<String>) -> Result<Option<CachedEntry>> {
        let key = key.into();
        self.spawn(move |store| store.get_value(&key)).await
    }

    /// See [`RobotsStore::update_value`]
    pub async fn update_value(&self, key: impl Into<String>, entry: CachedEntry) -> Result<()> {
        let key = key.into();
        self.spawn(move |store| store.update_value(&key, &entry)).await
    }

    /// See [`RobotsStore::push_key`]
    pub async fn push_key(&self, list: impl Into<String>, key: impl Into<String>) -> Result<()> {
        let (list, key) = (list.into(), key.into());
        self.spawn(move |store| store.push_key(&list, &key)).await
    }

    /// See [`RobotsStore::push_key_bounded`]
    pub async fn push_key_bounded(
        &self,
        list: impl Into<String>,
        key: impl Into<String>,
        max_len: u64,
    ) -> Result<()> {
        let (list, key) = (list.into(), key.into());
        self.spawn(move |store| store.push_key_bounded(&list, &key, max_len)).await
    }

    /// See [`RobotsStore::pop_key`]
    pub async fn pop_key(&self, list: impl Into<String>) -> Result<Option<String>> {
        let list = list.into();
        self.spawn(move |store| store.pop_key(&list)).await
    }

    /// See [`RobotsStore::close`]
    pub fn close(&self) {
        self.inner.close();
    }

    /// See [`RobotsStore::pool_stats`]
    pub fn pool_stats(&self) -> PoolStats {
        self.inner.pool_stats()
    }

    async fn spawn<T, F>(&self, call: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&RobotsStore<P>) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || call(&store))
            .await
            .map_err(|e| Error::internal(format!("Blocking store task failed: {e}")))?
    }
}

impl<P: ConnectionPool + 'static> Clone for AsyncRobotsStore<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: ConnectionPool + 'static> std::fmt::Debug for AsyncRobotsStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRobotsStore")
            .field("inner", &self.inner)
            .finish()
    }
}
