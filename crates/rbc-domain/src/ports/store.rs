//! Remote Store Port
//!
//! The subset of the key-value/queue protocol the access layer consumes.
//! One implementation value represents one live connection.

use crate::error::Result;

/// A live connection to the remote store
///
/// Implementations report connectivity problems as
/// [`Error::Connection`](crate::error::Error::Connection) and everything the
/// store itself rejects as [`Error::Command`](crate::error::Error::Command).
/// The command executor relies on that classification to pick the return
/// path of the connection.
pub trait StoreConnection: Send {
    /// GET: the value stored at `key`, `None` if absent
    fn get(&mut self, key: &str) -> Result<Option<String>>;

    /// SETEX: store `value` at `key` with an expiry, overwriting any prior value
    fn set_ex(&mut self, key: &str, ttl_secs: i64, value: &str) -> Result<()>;

    /// EXPIRE: refresh the expiry of an existing key
    ///
    /// Returns whether the key existed. A missing key is never created.
    fn expire(&mut self, key: &str, ttl_secs: i64) -> Result<bool>;

    /// TTL: remaining seconds, `-1` without expiry, `-2` when missing
    fn ttl(&mut self, key: &str) -> Result<i64>;

    /// RPUSH: append to the tail of a list, returning its new length
    fn rpush(&mut self, list: &str, value: &str) -> Result<u64>;

    /// LLEN: current length of a list (0 when missing)
    fn llen(&mut self, list: &str) -> Result<u64>;

    /// BLPOP with no timeout: wait for and remove the head of a list
    fn blpop(&mut self, list: &str) -> Result<String>;
}
