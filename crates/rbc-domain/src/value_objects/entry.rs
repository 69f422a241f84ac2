//! Cached robots.txt entry

use crate::constants::TTL_NO_EXPIRY;
use serde::{Deserialize, Serialize};

/// A cached artifact plus its remaining time-to-live
///
/// On reads, `ttl_secs` is whatever the store reported when the value was
/// fetched, including the store sentinels (`-1` for no expiry, `-2` when the
/// key expired between the value and TTL lookups).
///
/// On writes, an entry without a value only refreshes the expiry of the
/// existing key, which lets callers extend a cached miss-marker without
/// re-supplying its payload.
///
/// # Example
///
/// ```
/// use rbc_domain::CachedEntry;
///
/// let fresh = CachedEntry::new("User-agent: *\nDisallow: /", 3600);
/// assert!(fresh.has_value());
///
/// let touch = CachedEntry::expiry_only(600);
/// assert!(!touch.has_value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEntry {
    /// Cached payload; `None` means "refresh expiry only" on writes
    pub value: Option<String>,
    /// Remaining (reads) or requested (writes) time-to-live in seconds
    pub ttl_secs: i64,
}

impl CachedEntry {
    /// Create an entry carrying a value
    pub fn new<S: Into<String>>(value: S, ttl_secs: i64) -> Self {
        Self {
            value: Some(value.into()),
            ttl_secs,
        }
    }

    /// Create an entry that only carries an expiry
    pub fn expiry_only(ttl_secs: i64) -> Self {
        Self {
            value: None,
            ttl_secs,
        }
    }

    /// Whether a payload is present
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Borrow the payload, if any
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the store reported the key as persistent
    pub fn is_persistent(&self) -> bool {
        self.ttl_secs == TTL_NO_EXPIRY
    }
}
