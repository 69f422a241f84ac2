//! Connection pool statistics

use serde::{Deserialize, Serialize};

/// Point-in-time view of a connection pool
///
/// `acquired`, `released` and `discarded` are cumulative counters. Every
/// successful acquisition ends in exactly one release or one discard, so
/// once all calls have returned `acquired == released + discarded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PoolStats {
    /// Connections currently open (idle plus leased)
    pub connections: u32,
    /// Connections idle in the pool
    pub idle_connections: u32,
    /// Total successful acquisitions
    pub acquired: u64,
    /// Total connections returned through the healthy path
    pub released: u64,
    /// Total connections returned through the broken path
    pub discarded: u64,
}

impl PoolStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections currently handed out and not yet returned
    pub fn outstanding(&self) -> u64 {
        self.acquired
            .saturating_sub(self.released)
            .saturating_sub(self.discarded)
    }
}
