//! Handler contract for destination sinks

use super::error::Result;
use super::level::LogLevel;
use super::record::LogRecord;

/// A destination sink: console stream, queued file writer, or the relay to a
/// dedicated logger process.
///
/// Handlers are shared across channels behind `Arc`, so writes take `&self`
/// and use interior mutability for the owned resource. A returned error is
/// contained by the backend; it never reaches the logging caller.
pub trait Handler: Send + Sync {
    /// Records below this level are skipped for this handler.
    fn min_level(&self) -> LogLevel;

    fn write(&self, record: &LogRecord) -> Result<()>;

    fn flush(&self) -> Result<()>;

    /// Graceful resource release. Idempotent; called at shutdown.
    fn close(&self) {
        let _ = self.flush();
    }

    fn name(&self) -> &str;
}
