//! Domain Port Interfaces
//!
//! Boundary contracts between the access layer and its external
//! collaborators. Providers implement them; the application layer only
//! ever talks to these traits.
//!
//! ## Organization
//!
//! - **store** - the remote key-value/queue protocol spoken over one connection
//! - **pool** - acquisition and return of pooled connections
//! - **performance** - passive elapsed-time reporting

/// Connection pool port
pub mod pool;
/// Passive performance logging port
pub mod performance;
/// Remote store protocol port
pub mod store;

pub use performance::PerformanceLogger;
pub use pool::ConnectionPool;
pub use store::StoreConnection;
