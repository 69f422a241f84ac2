//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns: configuration, logging and wiring of
//! the store providers into a ready-to-use `RobotsStore`.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-based configuration (defaults, TOML, `RBC__` env) |
//! | [`constants`] | Infrastructure defaults |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | `RobotsStoreFactory` |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::RobotsStoreFactory;
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
