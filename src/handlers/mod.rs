//! Handler implementations

pub mod console;
pub mod queued;

#[cfg(unix)]
pub mod relay;

pub use console::ConsoleHandler;
pub use queued::{FileSink, LineSink, QueuedFileHandler};

#[cfg(unix)]
pub use relay::ProcessRelayHandler;

// Re-export the trait for convenience
pub use crate::core::Handler;
