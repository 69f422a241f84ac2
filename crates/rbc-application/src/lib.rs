//! # Robots Cache - Application Layer
//!
//! Runs cache and queue operations against pooled store connections.
//!
//! | Type | Role |
//! |------|------|
//! | [`CommandExecutor`] | Leases one connection per call and picks its return path |
//! | [`RobotsStore`] | robots.txt cache reads/writes and crawl queue push/pop |
//! | [`AsyncRobotsStore`] | Tokio facade running `RobotsStore` calls on the blocking pool |
//!
//! ## Example
//!
//! ```ignore
//! use rbc_application::RobotsStore;
//! use rbc_domain::CachedEntry;
//!
//! let store = RobotsStore::new(pool, perf_logger);
//! store.update_value("robots:example.com", &CachedEntry::new(body, 3600))?;
//! if let Some(entry) = store.get_value("robots:example.com")? {
//!     println!("{} seconds left", entry.ttl_secs);
//! }
//! ```

pub mod async_store;
pub mod executor;
pub mod robots;

pub use async_store::AsyncRobotsStore;
pub use executor::{CommandExecutor, ConnectionLease, ReleaseOutcome};
pub use robots::RobotsStore;
