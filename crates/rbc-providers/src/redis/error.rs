//! Redis error classification

use rbc_domain::error::Error;
use redis::RedisError;

/// Whether `err` leaves the connection unusable
///
/// I/O failures, dropped or refused connections and timeouts count; server
/// replies such as WRONGTYPE do not.
pub fn is_connection_error(err: &RedisError) -> bool {
    err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() || err.is_timeout()
}

/// Map a failed `command` into the domain error taxonomy
pub fn classify(command: &str, err: RedisError) -> Error {
    if is_connection_error(&err) {
        Error::connection_with_source(format!("Redis {command} failed: {err}"), err)
    } else {
        Error::command_with_source(format!("Redis {command} failed: {err}"), err)
    }
}
