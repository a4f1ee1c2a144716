//! # Corolog
//!
//! Logging dispatch subsystem for event-driven, coroutine-scheduled server
//! processes.
//!
//! ## Features
//!
//! - **Cheap gating**: disabled levels return before any allocation
//! - **Call-site augmentation**: records carry their origin when configured
//! - **Non-blocking delivery**: file writes drain through a dedicated writer
//!   thread; heavy deployments can relay lines to a dedicated logger process
//! - **Drop-in fallback**: a minimal Lite backend with the same severity
//!   contract when the full pipeline is disabled or fails to build

pub mod core;
pub mod handlers;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        BackendKind, DispatchError, DispatchMetrics, FieldValue, Handler, LineFormatter,
        LogConfig, LogFields, LogLevel, LogMessage, LogRecord, Logger, LoggerHub, Result,
    };
    pub use crate::handlers::{ConsoleHandler, QueuedFileHandler};
}

pub use crate::core::{
    BackendKind, CallSite, CallSiteProcessor, DispatchError, DispatchMetrics, ErrorTrace,
    FieldValue, Handler, LineFormatter, LiteBackend, LogBackend, LogConfig, LogFields, LogLevel,
    LogMessage, LogRecord, Logger, LoggerHub, PipelineBackend, Processor, Result, Threshold,
};
pub use crate::handlers::{ConsoleHandler, FileSink, LineSink, QueuedFileHandler};

#[cfg(unix)]
pub use crate::handlers::ProcessRelayHandler;
