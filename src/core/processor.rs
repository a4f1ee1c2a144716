//! Record processors: enrichment stages that run before any handler

use super::level::LogLevel;
use super::record::LogRecord;

/// A pipeline stage that enriches a record before it reaches handlers.
///
/// Processors run synchronously on the producing thread, before the record
/// crosses any queue or IPC boundary. Call-stack state is only valid there.
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
}

/// Stamps a record with its originating call site (file, line, and module
/// when available) for records at or above a configurable minimum level.
///
/// The origin is captured at the public call boundary; if none was captured
/// the record is left untouched. This never fails.
#[derive(Debug, Clone)]
pub struct CallSiteProcessor {
    min_level: LogLevel,
}

impl CallSiteProcessor {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Processor for CallSiteProcessor {
    fn process(&self, record: &mut LogRecord) {
        if record.level >= self.min_level {
            if let Some(origin) = record.origin() {
                record.call_site = Some(origin);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::CallSite;

    fn record_with_origin(level: LogLevel) -> LogRecord {
        LogRecord::new(level, "server", "msg".to_string()).with_origin(CallSite {
            file: "src/net.rs",
            line: 7,
            function: Some("corolog::net"),
        })
    }

    #[test]
    fn test_stamps_at_or_above_min_level() {
        let processor = CallSiteProcessor::new(LogLevel::Error);

        let mut record = record_with_origin(LogLevel::Error);
        processor.process(&mut record);
        assert!(record.call_site.is_some());
        assert_eq!(record.call_site.unwrap().line, 7);

        let mut record = record_with_origin(LogLevel::Info);
        processor.process(&mut record);
        assert!(record.call_site.is_none());
    }

    #[test]
    fn test_missing_origin_is_tolerated() {
        let processor = CallSiteProcessor::new(LogLevel::Trace);
        let mut record = LogRecord::new(LogLevel::Error, "server", "msg".to_string());
        processor.process(&mut record);
        assert!(record.call_site.is_none());
    }
}
