//! Performance logging configuration types

use serde::{Deserialize, Serialize};

/// Performance logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Report cache read timings through tracing
    pub enabled: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}
