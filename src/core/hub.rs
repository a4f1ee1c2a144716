//! Process-wide logging context
//!
//! `LoggerHub` is the explicitly constructed context object owned by the
//! process entry point: threshold, backend, channel registry, and metrics
//! live here, passed by handle to every `Logger`. Tests construct a fresh
//! hub instead of relying on hidden statics.

use super::backend::{LiteBackend, LogBackend, PipelineBackend};
use super::config::{BackendKind, LogConfig};
use super::error::Result;
use super::handler::Handler;
use super::level::{LogLevel, Threshold};
use super::logger::Logger;
use super::metrics::DispatchMetrics;
use super::processor::{CallSiteProcessor, Processor};
use crate::handlers::{ConsoleHandler, QueuedFileHandler};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub(crate) struct HubState {
    threshold: Threshold,
    backend: Arc<dyn LogBackend>,
}

pub(crate) struct HubInner {
    state: RwLock<HubState>,
    registry: RwLock<HashMap<String, Logger>>,
    default_name: RwLock<String>,
    inited: AtomicBool,
    metrics: Arc<DispatchMetrics>,
}

impl HubInner {
    /// Hot-path snapshot: one read lock, no allocation unless emitting.
    pub(crate) fn gate(&self, level: LogLevel) -> Option<Arc<dyn LogBackend>> {
        let state = self.state.read();
        if state.threshold.is_enabled(level) {
            Some(Arc::clone(&state.backend))
        } else {
            None
        }
    }

    pub(crate) fn is_trace(&self) -> bool {
        self.state.read().threshold.is_trace()
    }
}

/// The logging context for one server process.
#[derive(Clone)]
pub struct LoggerHub {
    inner: Arc<HubInner>,
}

impl LoggerHub {
    /// A hub starts with the Lite backend and a WARNING threshold, so
    /// logging works (minimally) even before `init` runs.
    pub fn new() -> Self {
        let metrics = Arc::new(DispatchMetrics::new());
        Self {
            inner: Arc::new(HubInner {
                state: RwLock::new(HubState {
                    threshold: Threshold::default(),
                    backend: Arc::new(LiteBackend::new(Arc::clone(&metrics))),
                }),
                registry: RwLock::new(HashMap::new()),
                default_name: RwLock::new("server".to_string()),
                inited: AtomicBool::new(false),
                metrics,
            }),
        }
    }

    /// Apply the configuration. Idempotent: a second call is a no-op and
    /// returns immediately, regardless of the configuration it carries.
    ///
    /// On a configuration error the hub keeps the Lite fallback so logging
    /// stays functional; the error is surfaced here once and not retried.
    pub fn init(&self, config: LogConfig) -> Result<()> {
        self.init_with_handlers(config, Vec::new())
    }

    /// Like `init`, with additional handlers appended after the configured
    /// ones. This is how embedders (and tests) attach custom sinks.
    ///
    /// Extra handlers attach to the full pipeline only. With
    /// `BackendKind::Lite` there is no pipeline and they are ignored.
    pub fn init_with_handlers(
        &self,
        config: LogConfig,
        extra: Vec<Arc<dyn Handler>>,
    ) -> Result<()> {
        if self.inner.inited.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let threshold = Threshold::new(config.level);
        self.inner.state.write().threshold = threshold;

        if config.backend == BackendKind::Lite {
            // Threshold applies; the pre-wired Lite backend stays.
            self.default_logger();
            return Ok(());
        }

        let backend = match self.build_pipeline(&config, extra) {
            Ok(backend) => backend,
            Err(e) => {
                eprintln!("[corolog] init failed, staying on lite backend: {}", e);
                return Err(e);
            }
        };

        self.inner.state.write().backend = backend;
        self.default_logger();
        Ok(())
    }

    fn build_pipeline(
        &self,
        config: &LogConfig,
        extra: Vec<Arc<dyn Handler>>,
    ) -> Result<Arc<dyn LogBackend>> {
        let mut processors: Vec<Box<dyn Processor>> = Vec::new();
        if let Some(level) = config.with_file_path {
            processors.push(Box::new(CallSiteProcessor::new(level)));
        }

        let mut handlers: Vec<Arc<dyn Handler>> = Vec::new();

        if config.stdout_enabled() {
            handlers.push(Arc::new(ConsoleHandler::new(config.level)));
        }

        // File output and process offload are mutually exclusive: either
        // this process writes the file, or only the dedicated one does.
        if let Some(ref path) = config.path {
            if config.logger_process {
                handlers.push(self.build_relay(config)?);
            } else {
                handlers.push(Arc::new(QueuedFileHandler::file(
                    path,
                    config.level,
                    config.queue_capacity,
                    config.flush_timeout(),
                    Arc::clone(&self.inner.metrics),
                )?));
            }
        }

        handlers.extend(extra);

        Ok(Arc::new(PipelineBackend::new(
            processors,
            handlers,
            Arc::clone(&self.inner.metrics),
        )))
    }

    #[cfg(unix)]
    fn build_relay(&self, config: &LogConfig) -> Result<Arc<dyn Handler>> {
        use crate::handlers::ProcessRelayHandler;
        Ok(Arc::new(ProcessRelayHandler::new(
            config.relay_socket(),
            config.level,
            config.flush_timeout(),
            Arc::clone(&self.inner.metrics),
        )))
    }

    #[cfg(not(unix))]
    fn build_relay(&self, _config: &LogConfig) -> Result<Arc<dyn Handler>> {
        Err(super::error::DispatchError::config(
            "logger_process",
            "process offload requires unix-domain sockets",
        ))
    }

    /// Get or lazily create the channel. Channels are never removed during
    /// the process lifetime.
    pub fn channel(&self, name: &str) -> Logger {
        if let Some(logger) = self.inner.registry.read().get(name) {
            return logger.clone();
        }
        let mut registry = self.inner.registry.write();
        registry
            .entry(name.to_string())
            .or_insert_with(|| Logger::new(name, Arc::clone(&self.inner)))
            .clone()
    }

    /// Look up a channel without creating it.
    pub fn get_logger(&self, name: &str) -> Option<Logger> {
        self.inner.registry.read().get(name).cloned()
    }

    pub fn set_logger(&self, name: &str, logger: Logger) {
        self.inner.registry.write().insert(name.to_string(), logger);
    }

    /// The default channel, under the current default name.
    pub fn default_logger(&self) -> Logger {
        let name = self.inner.default_name.read().clone();
        self.channel(&name)
    }

    /// Rename the default channel going forward; records already issued are
    /// unaffected.
    pub fn set_default_name(&self, name: &str) {
        *self.inner.default_name.write() = name.to_string();
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.state.read().threshold.is_enabled(level)
    }

    pub fn is_debug(&self) -> bool {
        self.inner.state.read().threshold.is_debug()
    }

    pub fn is_trace(&self) -> bool {
        self.inner.state.read().threshold.is_trace()
    }

    pub fn min_level(&self) -> LogLevel {
        self.inner.state.read().threshold.min_level()
    }

    pub fn metrics(&self) -> Arc<DispatchMetrics> {
        Arc::clone(&self.inner.metrics)
    }

    pub fn flush(&self) {
        let backend = Arc::clone(&self.inner.state.read().backend);
        backend.flush();
    }

    /// Release handler resources: drains the file writer queue and closes
    /// the relay stream. No explicit teardown is otherwise required.
    pub fn shutdown(&self) {
        let backend = Arc::clone(&self.inner.state.read().backend);
        backend.close();
    }
}

impl Default for LoggerHub {
    fn default() -> Self {
        Self::new()
    }
}
