//! Configuration passed into `LoggerHub::init`

use super::level::LogLevel;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Which implementation backs the severity-method contract.
///
/// The selection is made once at init and is transparent to callers: the
/// public method contracts hold identically for both variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Full pipeline: processors, formatters, and configured handlers.
    #[default]
    Full,
    /// Minimal built-in fallback writing plain lines to stderr.
    Lite,
}

/// Logging section of the host server configuration.
///
/// ```toml
/// level = "Warning"
/// path = "/var/log/server_$level.log"   # omit to disable file output
/// logger_process = false                # relay file writes to a dedicated process
/// logger_process_name = "logger"
/// stdout = false                        # defaults: true without file output, false with
/// with_file_path = "Error"              # call-site stamping threshold; omit = always
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Global minimum severity.
    pub level: LogLevel,

    /// File destination; `None` disables file output entirely. A literal
    /// `$level` token is substituted with the record's lowercase level name,
    /// producing per-level log files.
    pub path: Option<PathBuf>,

    /// Route file writes through a dedicated logger process instead of
    /// writing from this process. Only meaningful when `path` is set.
    pub logger_process: bool,

    /// Name of the dedicated logger process; also determines the default
    /// IPC socket path when `logger_process_socket` is not set.
    pub logger_process_name: String,

    /// Socket the dedicated logger process listens on. Defaults to
    /// `<temp_dir>/<logger_process_name>.sock`.
    pub logger_process_socket: Option<PathBuf>,

    /// Console output. When file output is enabled the console defaults to
    /// off unless explicitly requested; otherwise it defaults to on.
    pub stdout: Option<bool>,

    /// Minimum level at or above which records are stamped with their call
    /// site. `None` disables stamping entirely.
    pub with_file_path: Option<LogLevel>,

    /// Backend selection; `Lite` skips the pipeline entirely.
    pub backend: BackendKind,

    /// Capacity of the bounded queue in front of the file writer thread.
    pub queue_capacity: usize,

    /// Internal timeout applied when flushing an asynchronous handler.
    pub flush_timeout_ms: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warning,
            path: None,
            logger_process: false,
            logger_process_name: "logger".to_string(),
            logger_process_socket: None,
            stdout: None,
            with_file_path: Some(LogLevel::Trace),
            backend: BackendKind::Full,
            queue_capacity: 8192,
            flush_timeout_ms: 1000,
        }
    }
}

impl LogConfig {
    /// Resolved console flag. An explicit setting always wins; otherwise the
    /// console defaults to off when file output is configured and on when it
    /// is not.
    pub fn stdout_enabled(&self) -> bool {
        match (self.stdout, self.path.is_some()) {
            (Some(explicit), _) => explicit,
            (None, true) => false,
            (None, false) => true,
        }
    }

    pub fn flush_timeout(&self) -> Duration {
        Duration::from_millis(self.flush_timeout_ms)
    }

    /// Socket path for the dedicated logger process.
    pub fn relay_socket(&self) -> PathBuf {
        self.logger_process_socket.clone().unwrap_or_else(|| {
            std::env::temp_dir().join(format!("{}.sock", self.logger_process_name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stdout_defaults() {
        let config = LogConfig::default();
        assert!(config.stdout_enabled(), "no file output: console on");

        let config = LogConfig {
            path: Some(PathBuf::from("/tmp/app.log")),
            ..Default::default()
        };
        assert!(!config.stdout_enabled(), "file output: console off");

        let config = LogConfig {
            path: Some(PathBuf::from("/tmp/app.log")),
            stdout: Some(true),
            ..Default::default()
        };
        assert!(config.stdout_enabled(), "explicit stdout wins");

        let config = LogConfig {
            stdout: Some(false),
            ..Default::default()
        };
        assert!(!config.stdout_enabled(), "explicit off wins without a file");
    }

    #[test]
    fn test_relay_socket_from_process_name() {
        let config = LogConfig {
            logger_process_name: "svc-logger".to_string(),
            ..Default::default()
        };
        assert!(config
            .relay_socket()
            .to_string_lossy()
            .ends_with("svc-logger.sock"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: LogConfig =
            serde_json::from_str(r#"{"level": "Debug", "stdout": true}"#).unwrap();
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.stdout, Some(true));
        assert!(config.path.is_none());
        assert_eq!(config.queue_capacity, 8192);
    }
}
