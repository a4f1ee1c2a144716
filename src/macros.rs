//! Logging macros for ergonomic message formatting.
//!
//! Each macro forwards through the logger's level methods with automatic
//! `format!`-style interpolation and passes `module_path!()` along so the
//! call-site processor can attach the originating module.
//!
//! # Examples
//!
//! ```
//! use corolog::prelude::*;
//! use corolog::{info, warning};
//!
//! let hub = LoggerHub::new();
//! hub.init(LogConfig::default()).unwrap();
//! let logger = hub.default_logger();
//!
//! warning!(logger, "worker {} restarted", 3);
//! info!(logger, "listening on port {}", 8080);
//! ```

/// Log a message at an explicit level with automatic formatting.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_from($level, format!($($arg)+), module_path!())
    };
}

/// Log a trace-level message (subject to the hub's trace gating).
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Notice, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Critical, $($arg)+)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Alert, $($arg)+)
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Emergency, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogConfig, LogLevel, LoggerHub};

    fn logger() -> crate::core::Logger {
        let hub = LoggerHub::new();
        hub.init(LogConfig {
            level: LogLevel::Trace,
            ..Default::default()
        })
        .expect("init");
        hub.default_logger()
    }

    #[test]
    fn test_log_macro() {
        let logger = logger();
        log!(logger, LogLevel::Info, "plain message");
        log!(logger, LogLevel::Error, "code: {}", 500);
    }

    #[test]
    fn test_level_macros() {
        let logger = logger();
        trace!(logger, "entering accept loop");
        debug!(logger, "fd {} registered", 12);
        info!(logger, "{} workers online", 4);
        notice!(logger, "config reloaded");
        warning!(logger, "retry {} of {}", 1, 3);
        error!(logger, "bind failed");
        critical!(logger, "out of descriptors");
        alert!(logger, "disk almost full");
        emergency!(logger, "shutting down");
    }
}
