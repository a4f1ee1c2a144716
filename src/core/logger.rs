//! The dispatcher facade: one named channel over the shared hub

use super::fields::LogFields;
use super::hub::HubInner;
use super::level::LogLevel;
use super::record::{CallSite, ErrorTrace, LogMessage, LogRecord};
use std::panic::Location;
use std::sync::Arc;

/// A named logger channel. Cheap to clone; all clones share the hub's
/// threshold, backend, and handlers.
///
/// Every level method accepts either a plain message or an explicit error
/// value (`LogMessage::error`). Error payloads are normalized: the error's
/// description becomes the message and the full rendering travels with the
/// record. `info` is the one exception: it renders the payload raw and
/// attaches no trace. That asymmetry is part of the contract this facade
/// preserves, not an oversight to fix.
#[derive(Clone)]
pub struct Logger {
    channel: Arc<str>,
    hub: Arc<HubInner>,
}

impl Logger {
    pub(crate) fn new(channel: &str, hub: Arc<HubInner>) -> Self {
        Self {
            channel: Arc::from(channel),
            hub,
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Threshold check, normalization, record construction, and hand-off to
    /// the backend. Runs synchronously; the disabled-level path returns
    /// before any allocation.
    #[track_caller]
    fn dispatch(
        &self,
        level: LogLevel,
        message: LogMessage,
        fields: LogFields,
        normalize: bool,
        function: Option<&'static str>,
    ) {
        let Some(backend) = self.hub.gate(level) else {
            return;
        };

        let (text, trace) = if normalize {
            match message {
                LogMessage::Text(s) => (s, None),
                LogMessage::Failure(err) => {
                    let trace = ErrorTrace::from_error(err.as_ref());
                    (trace.description.clone(), Some(trace))
                }
            }
        } else {
            (message.raw_text(), None)
        };

        let mut record = LogRecord::new(level, &*self.channel, text)
            .with_fields(fields)
            .with_origin(CallSite::from_location(Location::caller(), function));
        if let Some(trace) = trace {
            record = record.with_trace(trace);
        }

        backend.emit(record);
    }

    /// Shared entry point for every level, including the trace gating and
    /// the `info` normalization exception.
    #[track_caller]
    fn emit(
        &self,
        level: LogLevel,
        message: LogMessage,
        fields: LogFields,
        function: Option<&'static str>,
    ) {
        if level == LogLevel::Trace && !self.hub.is_trace() {
            // Tracing off: an error payload still surfaces, downgraded to
            // WARNING; a plain trace message is dropped entirely.
            if message.is_failure() {
                self.dispatch(LogLevel::Warning, message, fields, true, function);
            }
            return;
        }
        self.dispatch(level, message, fields, level != LogLevel::Info, function);
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<LogMessage>) {
        self.emit(level, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn log_with(&self, level: LogLevel, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(level, message.into(), fields, None);
    }

    /// Macro entry point carrying the caller's module path.
    #[doc(hidden)]
    #[track_caller]
    pub fn log_from(&self, level: LogLevel, message: impl Into<LogMessage>, function: &'static str) {
        self.emit(level, message.into(), LogFields::new(), Some(function));
    }

    #[track_caller]
    pub fn trace(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Trace, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn trace_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Trace, message.into(), fields, None);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Debug, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn debug_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Debug, message.into(), fields, None);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Info, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn info_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Info, message.into(), fields, None);
    }

    #[track_caller]
    pub fn notice(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Notice, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn notice_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Notice, message.into(), fields, None);
    }

    #[track_caller]
    pub fn warning(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Warning, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn warning_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Warning, message.into(), fields, None);
    }

    /// Alias for `warning`, kept for interface compatibility.
    #[track_caller]
    pub fn warn(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Warning, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Error, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn error_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Error, message.into(), fields, None);
    }

    #[track_caller]
    pub fn critical(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Critical, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn critical_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Critical, message.into(), fields, None);
    }

    #[track_caller]
    pub fn alert(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Alert, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn alert_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Alert, message.into(), fields, None);
    }

    #[track_caller]
    pub fn emergency(&self, message: impl Into<LogMessage>) {
        self.emit(LogLevel::Emergency, message.into(), LogFields::new(), None);
    }

    #[track_caller]
    pub fn emergency_with(&self, message: impl Into<LogMessage>, fields: LogFields) {
        self.emit(LogLevel::Emergency, message.into(), fields, None);
    }
}
