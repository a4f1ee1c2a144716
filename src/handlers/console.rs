//! Console handler

use crate::core::{Handler, LineFormatter, LogLevel, LogRecord, Result};
use std::io::{self, Write};

/// Synchronous colorized console sink.
///
/// Intended for interactive/foreground use: console output is bounded and
/// typically fast, so a brief blocking write is acceptable here. Error and
/// above go to stderr, everything else to stdout.
pub struct ConsoleHandler {
    min_level: LogLevel,
    formatter: LineFormatter,
}

impl ConsoleHandler {
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            formatter: LineFormatter::colorized(),
        }
    }

    pub fn with_colors(min_level: LogLevel, use_colors: bool) -> Self {
        Self {
            min_level,
            formatter: LineFormatter { with_color: use_colors },
        }
    }

    /// A dead descriptor (closed pipe, full disk behind a redirect) must
    /// surface as a contained sink failure, so this avoids the `println!`
    /// machinery, which panics on a failed write.
    fn emit_to(&self, record: &LogRecord, out: &mut dyn Write) -> Result<()> {
        let line = self.formatter.format(record);
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

impl Handler for ConsoleHandler {
    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        if record.level >= LogLevel::Error {
            self.emit_to(record, &mut io::stderr().lock())
        } else {
            self.emit_to(record, &mut io::stdout().lock())
        }
    }

    fn flush(&self) -> Result<()> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
