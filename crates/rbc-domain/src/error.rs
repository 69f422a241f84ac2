//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the robots cache access layer
///
/// The variants follow the failure taxonomy of the command executor:
/// connectivity failures are recovered locally, while acquisition and
/// command failures reach the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// The remote store is unreachable or the connection became unusable
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connectivity failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The pool could not hand out a connection
    #[error("Connection acquisition failed: {message}")]
    Acquisition {
        /// Description of the acquisition failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The pool has been shut down
    #[error("Connection pool is closed")]
    PoolClosed,

    /// The store rejected a command (wrong type, invalid argument, ...)
    #[error("Store command error: {message}")]
    Command {
        /// Description of the command failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Infrastructure setup failure (logging, bootstrap)
    #[error("Infrastructure error: {message}")]
    Infrastructure {
        /// Description of the infrastructure error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

impl Error {
    /// Whether this failure means the connection it happened on is unusable
    ///
    /// Only these failures are swallowed by the command executor; the
    /// connection is then discarded instead of being released.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::Connection { .. })
    }

    /// Whether the pool failed to supply a connection
    pub fn is_acquisition_failure(&self) -> bool {
        matches!(self, Self::Acquisition { .. } | Self::PoolClosed)
    }
}

// Store error creation methods
impl Error {
    /// Create a connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection error with source
    pub fn connection_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Connection {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an acquisition error
    pub fn acquisition<S: Into<String>>(message: S) -> Self {
        Self::Acquisition {
            message: message.into(),
            source: None,
        }
    }

    /// Create an acquisition error with source
    pub fn acquisition_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Acquisition {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a command error
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
            source: None,
        }
    }

    /// Create a command error with source
    pub fn command_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Command {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Ambient error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an I/O error with source
    pub fn io_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an infrastructure error
    pub fn infrastructure<S: Into<String>>(message: S) -> Self {
        Self::Infrastructure {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
