//! Value objects exchanged across the store boundary

mod entry;
mod stats;

pub use entry::CachedEntry;
pub use stats::PoolStats;
