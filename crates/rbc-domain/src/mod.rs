//! # Robots Cache - Domain Layer
//!
//! Core types and boundary contracts for the robots.txt cache and crawl
//! queue access layer.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`value_objects`] | `CachedEntry`, `PoolStats` |
//! | [`ports`] | `StoreConnection`, `ConnectionPool`, `PerformanceLogger` |
//! | [`constants`] | Operation names and store sentinels |
//!
//! The remote store, its pooling and performance reporting are all external
//! collaborators reached only through [`ports`].

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{ConnectionPool, PerformanceLogger, StoreConnection};
pub use value_objects::{CachedEntry, PoolStats};
