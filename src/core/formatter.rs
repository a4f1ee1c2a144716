//! Line rendering for records

use super::record::LogRecord;
use colored::Colorize;

/// Renders a record as one text line:
///
/// `[<timestamp>] <channel>.<LEVEL>: <message> <fields> [<file>:<line>]`
///
/// The colorized variant paints the level name for console output; the plain
/// variant is used by the file and process-offload handlers. Formatting is
/// deterministic and never panics for a well-formed record.
#[derive(Debug, Clone)]
pub struct LineFormatter {
    pub with_color: bool,
}

impl LineFormatter {
    pub fn plain() -> Self {
        Self { with_color: false }
    }

    pub fn colorized() -> Self {
        Self { with_color: true }
    }

    pub fn format(&self, record: &LogRecord) -> String {
        let level_str = if self.with_color {
            record
                .level
                .to_str()
                .color(record.level.color_code())
                .to_string()
        } else {
            record.level.to_str().to_string()
        };

        let timestamp_str = record.timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ");

        let mut line = format!(
            "[{}] {}.{}: {}",
            timestamp_str, record.channel, level_str, record.message
        );

        if !record.fields.is_empty() {
            line.push(' ');
            line.push_str(&record.fields.format_fields());
        }

        if let Some(ref trace) = record.trace {
            if trace.detail != trace.description {
                line.push_str(&format!(" trace={:?}", trace.detail));
            }
        }

        if let Some(ref site) = record.call_site {
            line.push_str(&format!(" [{}]", site));
        }

        line
    }
}

impl Default for LineFormatter {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fields::LogFields;
    use crate::core::level::LogLevel;
    use crate::core::record::{CallSite, ErrorTrace};

    #[test]
    fn test_plain_format_shape() {
        let record = LogRecord::new(LogLevel::Warning, "server", "low disk".to_string());
        let line = LineFormatter::plain().format(&record);

        assert!(line.contains("server.WARNING: low disk"));
        assert!(line.starts_with('['));
        assert!(line.contains('T'), "timestamp should be ISO-like");
    }

    #[test]
    fn test_format_with_fields() {
        let fields = LogFields::new().with_field("worker", 3).with_field("op", "bind");
        let record =
            LogRecord::new(LogLevel::Info, "server", "listening".to_string()).with_fields(fields);
        let line = LineFormatter::plain().format(&record);

        assert!(line.contains("op=bind"));
        assert!(line.contains("worker=3"));
    }

    #[test]
    fn test_format_with_call_site() {
        let record = LogRecord::new(LogLevel::Error, "server", "bad".to_string());
        let mut record = record;
        record.call_site = Some(CallSite {
            file: "src/worker.rs",
            line: 42,
            function: None,
        });
        let line = LineFormatter::plain().format(&record);
        assert!(line.ends_with("[src/worker.rs:42]"));
    }

    #[test]
    fn test_format_with_trace_detail() {
        let record = LogRecord::new(LogLevel::Error, "server", "accept failed".to_string())
            .with_trace(ErrorTrace {
                description: "accept failed".to_string(),
                detail: "Os { code: 24, kind: Other }".to_string(),
            });
        let line = LineFormatter::plain().format(&record);
        assert!(line.contains("trace="));
        assert!(line.contains("code: 24"));
    }

    #[test]
    fn test_colorized_contains_escape_codes() {
        colored::control::set_override(true);
        let record = LogRecord::new(LogLevel::Warning, "server", "y".to_string());
        let line = LineFormatter::colorized().format(&record);
        assert!(line.contains("\x1b["));
        assert!(line.contains('y'));
        colored::control::unset_override();
    }
}
