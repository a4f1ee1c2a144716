//! Error types for the dispatch subsystem

pub type Result<T> = std::result::Result<T, DispatchError>;

/// Failures internal to the logging pipeline.
///
/// None of these ever propagate out of a logging call: configuration errors
/// surface once from `LoggerHub::init`, everything else is contained by the
/// backend and reduced to a bounded stderr self-report.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File handler error with path
    #[error("File handler error for '{path}': {message}")]
    FileHandler { path: String, message: String },

    /// Writer queue has been closed (handler shut down)
    #[error("Log queue closed")]
    QueueClosed,

    /// Flush did not complete within the handler's internal timeout
    #[error("Flush timed out for handler '{handler}'")]
    FlushTimeout { handler: String },

    /// Send to the dedicated logger process failed
    #[error("Relay send failed: {message}")]
    RelaySend { message: String },
}

impl DispatchError {
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        DispatchError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn file_handler(path: impl Into<String>, message: impl Into<String>) -> Self {
        DispatchError::FileHandler {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn relay(message: impl Into<String>) -> Self {
        DispatchError::RelaySend {
            message: message.into(),
        }
    }
}
