//! Severity levels and the global threshold

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity classification, ascending.
///
/// `Trace` is a dedicated verbose level below `Debug`; it is only emitted
/// when tracing is enabled on the hub (see `Logger::trace`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Notice = 3,
    #[default]
    Warning = 4,
    Error = 5,
    Critical = 6,
    Alert = 7,
    Emergency = 8,
}

impl LogLevel {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Notice => "NOTICE",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
            LogLevel::Alert => "ALERT",
            LogLevel::Emergency => "EMERGENCY",
        }
    }

    /// Lowercase name, used for `$level` substitution in file paths.
    pub fn to_str_lower(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Notice => "notice",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Critical => "critical",
            LogLevel::Alert => "alert",
            LogLevel::Emergency => "emergency",
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Trace => BrightBlack,
            LogLevel::Debug => Blue,
            LogLevel::Info => Green,
            LogLevel::Notice => Cyan,
            LogLevel::Warning => Yellow,
            LogLevel::Error => Red,
            LogLevel::Critical | LogLevel::Alert | LogLevel::Emergency => BrightRed,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "NOTICE" => Ok(LogLevel::Notice),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            "ALERT" => Ok(LogLevel::Alert),
            "EMERGENCY" => Ok(LogLevel::Emergency),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// Global minimum level plus the derived flags, computed once at init.
///
/// The flags let callers guard expensive diagnostic work without going
/// through a full level comparison each time.
#[derive(Debug, Clone, Copy)]
pub struct Threshold {
    min: LogLevel,
    is_debug: bool,
    is_trace: bool,
}

impl Threshold {
    pub fn new(min: LogLevel) -> Self {
        Self {
            min,
            is_debug: min <= LogLevel::Debug,
            is_trace: min <= LogLevel::Trace,
        }
    }

    /// Cheap pre-check used before any record is constructed.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.min
    }

    #[inline]
    pub fn min_level(&self) -> LogLevel {
        self.min
    }

    #[inline]
    pub fn is_debug(&self) -> bool {
        self.is_debug
    }

    #[inline]
    pub fn is_trace(&self) -> bool {
        self.is_trace
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::new(LogLevel::Warning)
    }
}
