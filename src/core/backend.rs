//! Backend strategies behind the dispatcher facade
//!
//! Two interchangeable variants sit behind one interface, selected once at
//! init: the full pipeline (processors + handler fan-out) and the minimal
//! Lite fallback. Callers cannot tell them apart through the public surface.

use super::formatter::LineFormatter;
use super::handler::Handler;
use super::metrics::DispatchMetrics;
use super::processor::Processor;
use super::record::LogRecord;
use std::io::Write;
use std::sync::Arc;

/// How often a repeated sink failure is re-reported to stderr.
const SINK_FAILURE_REPORT_EVERY: u64 = 1000;

pub trait LogBackend: Send + Sync {
    /// Run the record through the pipeline. Failures are contained here;
    /// nothing propagates to the logging caller.
    fn emit(&self, record: LogRecord);

    fn flush(&self);

    fn close(&self);
}

/// Full pipeline: processors enrich the record, then every attached handler
/// at or below the record's level receives it, in attachment order.
pub struct PipelineBackend {
    processors: Vec<Box<dyn Processor>>,
    handlers: Vec<Arc<dyn Handler>>,
    metrics: Arc<DispatchMetrics>,
}

impl PipelineBackend {
    pub fn new(
        processors: Vec<Box<dyn Processor>>,
        handlers: Vec<Arc<dyn Handler>>,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            processors,
            handlers,
            metrics,
        }
    }

    pub fn handlers(&self) -> &[Arc<dyn Handler>] {
        &self.handlers
    }

    fn report_sink_failure(&self, handler: &str, err: &crate::core::error::DispatchError) {
        let previous = self.metrics.record_sink_failure();
        // First failure and every Nth thereafter, to avoid silent total
        // failure without flooding the console.
        if previous == 0 || (previous + 1).is_multiple_of(SINK_FAILURE_REPORT_EVERY) {
            eprintln!(
                "[corolog] handler '{}' failed ({} total): {}",
                handler,
                previous + 1,
                err
            );
        }
    }
}

impl LogBackend for PipelineBackend {
    fn emit(&self, mut record: LogRecord) {
        for processor in &self.processors {
            processor.process(&mut record);
        }

        let mut has_error = false;
        for handler in &self.handlers {
            if record.level < handler.min_level() {
                continue;
            }
            if let Err(e) = handler.write(&record) {
                self.report_sink_failure(handler.name(), &e);
                has_error = true;
            }
        }

        if !has_error {
            self.metrics.record_emitted();
        }
    }

    fn flush(&self) {
        for handler in &self.handlers {
            if let Err(e) = handler.flush() {
                self.report_sink_failure(handler.name(), &e);
            }
        }
    }

    fn close(&self) {
        for handler in &self.handlers {
            handler.close();
        }
    }
}

/// Drop-in minimal logger: same severity contract, plain lines straight to
/// stderr. Active when the full pipeline is disabled or failed to build.
pub struct LiteBackend {
    formatter: LineFormatter,
    metrics: Arc<DispatchMetrics>,
}

impl LiteBackend {
    pub fn new(metrics: Arc<DispatchMetrics>) -> Self {
        Self {
            formatter: LineFormatter::plain(),
            metrics,
        }
    }
}

impl LogBackend for LiteBackend {
    fn emit(&self, record: LogRecord) {
        let line = self.formatter.format(&record);
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
        self.metrics.record_emitted();
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }

    fn close(&self) {
        self.flush();
    }
}
