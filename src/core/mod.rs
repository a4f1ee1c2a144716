//! Core types, the dispatch facade, and the process-wide hub

pub mod backend;
pub mod config;
pub mod error;
pub mod fields;
pub mod formatter;
pub mod handler;
pub mod hub;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod processor;
pub mod record;

pub use backend::{LiteBackend, LogBackend, PipelineBackend};
pub use config::{BackendKind, LogConfig};
pub use error::{DispatchError, Result};
pub use fields::{FieldValue, LogFields};
pub use formatter::LineFormatter;
pub use handler::Handler;
pub use hub::LoggerHub;
pub use level::{LogLevel, Threshold};
pub use logger::Logger;
pub use metrics::DispatchMetrics;
pub use processor::{CallSiteProcessor, Processor};
pub use record::{CallSite, ErrorTrace, LogMessage, LogRecord};
