//! The unit of work passed through the pipeline

use super::fields::LogFields;
use super::level::LogLevel;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::atomic::{AtomicI64, Ordering};

// Watermark for the per-process monotonic timestamp guarantee. Wall clock
// steps backwards are clamped to the last issued value.
static LAST_TIMESTAMP_MICROS: AtomicI64 = AtomicI64::new(0);

fn monotonic_now() -> DateTime<Utc> {
    let now = Utc::now().timestamp_micros();
    let mut prev = LAST_TIMESTAMP_MICROS.load(Ordering::Relaxed);
    let clamped = loop {
        let candidate = now.max(prev);
        match LAST_TIMESTAMP_MICROS.compare_exchange_weak(
            prev,
            candidate,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break candidate,
            Err(actual) => prev = actual,
        }
    };
    Utc.timestamp_micros(clamped).single().unwrap_or_else(Utc::now)
}

/// Payload accepted by the level methods: either a plain message or an
/// explicit error value. Normalization is a match over this variant, not a
/// runtime type check.
pub enum LogMessage {
    Text(String),
    Failure(Box<dyn Error + Send + Sync>),
}

impl LogMessage {
    pub fn error(err: impl Error + Send + Sync + 'static) -> Self {
        LogMessage::Failure(Box::new(err))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, LogMessage::Failure(_))
    }

    /// Raw string conversion without unwrapping: the whole payload rendered
    /// as-is. Used by `info`, which intentionally skips normalization.
    pub(crate) fn raw_text(self) -> String {
        match self {
            LogMessage::Text(s) => s,
            LogMessage::Failure(err) => format!("{:?}", err),
        }
    }
}

impl From<String> for LogMessage {
    fn from(s: String) -> Self {
        LogMessage::Text(s)
    }
}

impl From<&str> for LogMessage {
    fn from(s: &str) -> Self {
        LogMessage::Text(s.to_string())
    }
}

impl From<Box<dyn Error + Send + Sync>> for LogMessage {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        LogMessage::Failure(err)
    }
}

impl fmt::Debug for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::Text(s) => f.debug_tuple("Text").field(s).finish(),
            LogMessage::Failure(e) => f.debug_tuple("Failure").field(&e.to_string()).finish(),
        }
    }
}

/// What remains of a normalized error payload once it enters the record:
/// the short description becomes the message, the full rendering is kept
/// here for the formatter.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorTrace {
    pub description: String,
    pub detail: String,
}

impl ErrorTrace {
    pub fn from_error(err: &(dyn Error + Send + Sync)) -> Self {
        let description = err.to_string();
        let mut detail = format!("{:?}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            detail.push_str(&format!("; caused by: {}", cause));
            source = cause.source();
        }
        Self { description, detail }
    }
}

/// Originating call site of a record: file, line, and (when the macros are
/// used) the module the call came from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CallSite {
    pub file: &'static str,
    pub line: u32,
    pub function: Option<&'static str>,
}

impl CallSite {
    pub fn from_location(location: &'static Location<'static>, function: Option<&'static str>) -> Self {
        Self {
            file: location.file(),
            line: location.line(),
            function,
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// A single log record. The level is fixed at creation; only processors may
/// mutate the record, and only before handler dispatch begins.
#[derive(Debug, Clone, Serialize)]
pub struct LogRecord {
    pub level: LogLevel,
    pub channel: String,
    pub message: String,
    pub fields: LogFields,
    pub trace: Option<ErrorTrace>,
    pub timestamp: DateTime<Utc>,
    /// Stamped by the call-site processor when the record qualifies.
    pub call_site: Option<CallSite>,
    // Captured at the call boundary, before any suspension or queueing.
    // Processors promote it into `call_site`; handlers never see it directly.
    #[serde(skip)]
    origin: Option<CallSite>,
}

impl LogRecord {
    /// Escape newlines, carriage returns, and tabs so one logging call can
    /// never forge additional log lines.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, channel: impl Into<String>, message: String) -> Self {
        Self {
            level,
            channel: channel.into(),
            message: Self::sanitize_message(&message),
            fields: LogFields::new(),
            trace: None,
            timestamp: monotonic_now(),
            call_site: None,
            origin: None,
        }
    }

    pub fn with_fields(mut self, fields: LogFields) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_trace(mut self, trace: ErrorTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn with_origin(mut self, origin: CallSite) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn origin(&self) -> Option<CallSite> {
        self.origin
    }
}
