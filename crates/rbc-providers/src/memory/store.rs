//! In-process key-value/list store
//!
//! Emulates the seven commands the access layer needs with the semantics of
//! the remote store: lazy expiry, TTL rounding and sentinels, WRONGTYPE
//! errors when a string key is used as a list (and the reverse), and a
//! blocking head pop woken by pushes.

use rbc_domain::constants::{TTL_MISSING_KEY, TTL_NO_EXPIRY};
use rbc_domain::error::{Error, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

const WRONGTYPE: &str = "WRONGTYPE Operation against a key holding the wrong kind of value";

#[derive(Debug, Default)]
struct State {
    values: HashMap<String, String>,
    lists: HashMap<String, VecDeque<String>>,
    expiries: HashMap<String, Instant>,
    closed: bool,
}

impl State {
    /// Drop `key` if its expiry has passed
    fn purge_expired(&mut self, key: &str) {
        let expired = self
            .expiries
            .get(key)
            .is_some_and(|deadline| *deadline <= Instant::now());
        if expired {
            self.remove(key);
        }
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
        self.lists.remove(key);
        self.expiries.remove(key);
    }

    fn exists(&self, key: &str) -> bool {
        self.values.contains_key(key) || self.lists.contains_key(key)
    }
}

/// Shared in-process store
///
/// Thread-safe; share it behind an `Arc` between pools and test code.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    pushed: Condvar,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| Error::internal("In-memory store lock poisoned"))
    }

    fn live(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.lock()?;
        if state.closed {
            return Err(Error::connection("In-memory store is closed"));
        }
        Ok(state)
    }

    /// GET
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let mut state = self.live()?;
        state.purge_expired(key);
        if state.lists.contains_key(key) {
            return Err(Error::command(WRONGTYPE));
        }
        Ok(state.values.get(key).cloned())
    }

    /// SETEX; rejects non-positive TTLs like the remote store does
    pub fn set_ex(&self, key: &str, ttl_secs: i64, value: &str) -> Result<()> {
        let secs = u64::try_from(ttl_secs)
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| Error::command("ERR invalid expire time in 'setex' command"))?;

        let mut state = self.live()?;
        state.remove(key);
        state.values.insert(key.to_string(), value.to_string());
        state
            .expiries
            .insert(key.to_string(), Instant::now() + Duration::from_secs(secs));
        Ok(())
    }

    /// EXPIRE; a non-positive TTL deletes the key
    pub fn expire(&self, key: &str, ttl_secs: i64) -> Result<bool> {
        let mut state = self.live()?;
        state.purge_expired(key);
        if !state.exists(key) {
            return Ok(false);
        }
        match u64::try_from(ttl_secs) {
            Ok(secs) if secs > 0 => {
                state
                    .expiries
                    .insert(key.to_string(), Instant::now() + Duration::from_secs(secs));
            }
            _ => state.remove(key),
        }
        Ok(true)
    }

    /// TTL, rounded to the nearest second
    pub fn ttl(&self, key: &str) -> Result<i64> {
        let mut state = self.live()?;
        state.purge_expired(key);
        if !state.exists(key) {
            return Ok(TTL_MISSING_KEY);
        }
        let Some(deadline) = state.expiries.get(key) else {
            return Ok(TTL_NO_EXPIRY);
        };
        let remaining_ms = deadline.saturating_duration_since(Instant::now()).as_millis();
        Ok(i64::try_from((remaining_ms + 500) / 1000).unwrap_or(i64::MAX))
    }

    /// RPUSH
    pub fn rpush(&self, list: &str, value: &str) -> Result<u64> {
        let mut state = self.live()?;
        state.purge_expired(list);
        if state.values.contains_key(list) {
            return Err(Error::command(WRONGTYPE));
        }
        let entries = state.lists.entry(list.to_string()).or_default();
        entries.push_back(value.to_string());
        let len = entries.len() as u64;
        drop(state);
        self.pushed.notify_all();
        Ok(len)
    }

    /// LLEN
    pub fn llen(&self, list: &str) -> Result<u64> {
        let mut state = self.live()?;
        state.purge_expired(list);
        if state.values.contains_key(list) {
            return Err(Error::command(WRONGTYPE));
        }
        Ok(state.lists.get(list).map_or(0, |entries| entries.len() as u64))
    }

    /// BLPOP with no timeout
    ///
    /// Waits until an element arrives. Closing the store wakes waiters with
    /// a connection failure.
    pub fn blpop(&self, list: &str) -> Result<String> {
        let mut state = self.live()?;
        loop {
            state.purge_expired(list);
            if state.values.contains_key(list) {
                return Err(Error::command(WRONGTYPE));
            }
            if let Some(entries) = state.lists.get_mut(list) {
                if let Some(head) = entries.pop_front() {
                    if entries.is_empty() {
                        state.remove(list);
                    }
                    return Ok(head);
                }
            }
            state = self
                .pushed
                .wait(state)
                .map_err(|_| Error::internal("In-memory store lock poisoned"))?;
            if state.closed {
                return Err(Error::connection("In-memory store closed while waiting"));
            }
        }
    }

    /// Close the store, failing current and future commands
    pub fn close(&self) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.closed = true;
        drop(state);
        self.pushed.notify_all();
    }

    /// Whether [`close`](Self::close) was called
    pub fn is_closed(&self) -> bool {
        self.lock().map(|state| state.closed).unwrap_or(true)
    }

    /// Whether `key` currently exists (string or list)
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock()
            .map(|mut state| {
                state.purge_expired(key);
                state.exists(key)
            })
            .unwrap_or(false)
    }
}
