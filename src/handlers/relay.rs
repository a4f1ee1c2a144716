//! Process-offload handler
//!
//! Instead of touching the log file from this process, each record is
//! rendered to one line and relayed over a unix-domain socket to a dedicated
//! logger process, which is the only process that writes the file. This
//! keeps log IO latency out of the request-serving workers.
//!
//! The peer may be down or mid-restart at any time: sends never crash or
//! indefinitely block the caller. A failed send gets one reconnect-and-resend
//! attempt; after that the record is dropped, counted, and a throttled
//! one-line notice goes to stderr.

use crate::core::{
    DispatchError, DispatchMetrics, Handler, LineFormatter, LogLevel, LogRecord, Result,
};
use parking_lot::Mutex;
use std::io::Write;
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// How often a repeated relay drop is re-reported to stderr.
const DROP_REPORT_EVERY: u64 = 100;

struct RelayState {
    stream: Option<UnixStream>,
}

pub struct ProcessRelayHandler {
    min_level: LogLevel,
    formatter: LineFormatter,
    socket_path: PathBuf,
    write_timeout: Duration,
    state: Mutex<RelayState>,
    metrics: Arc<DispatchMetrics>,
}

impl ProcessRelayHandler {
    /// The connection is established lazily on first write; an absent peer
    /// at construction time is not an error.
    pub fn new(
        socket_path: PathBuf,
        min_level: LogLevel,
        write_timeout: Duration,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        Self {
            min_level,
            formatter: LineFormatter::plain(),
            socket_path,
            write_timeout,
            state: Mutex::new(RelayState { stream: None }),
            metrics,
        }
    }

    fn connect(&self) -> std::io::Result<UnixStream> {
        let stream = UnixStream::connect(&self.socket_path)?;
        stream.set_write_timeout(Some(self.write_timeout))?;
        Ok(stream)
    }

    /// One framed message: the formatted line plus the record separator.
    /// The state mutex serializes producers, so two lines can never
    /// interleave bytes on the stream.
    fn send_framed(&self, state: &mut RelayState, payload: &[u8]) -> std::io::Result<()> {
        if state.stream.is_none() {
            state.stream = Some(self.connect()?);
        }
        let stream = state
            .stream
            .as_mut()
            .unwrap_or_else(|| unreachable!("stream connected above"));
        stream.write_all(payload)
    }

    fn report_drop(&self, err: &std::io::Error) {
        let previous = self.metrics.record_dropped();
        if previous == 0 || (previous + 1).is_multiple_of(DROP_REPORT_EVERY) {
            eprintln!(
                "[corolog] logger process unreachable at {} ({} records dropped): {}",
                self.socket_path.display(),
                previous + 1,
                err
            );
        }
    }
}

impl Handler for ProcessRelayHandler {
    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        let mut payload = self.formatter.format(record).into_bytes();
        payload.push(b'\n');

        let mut state = self.state.lock();
        match self.send_framed(&mut state, &payload) {
            Ok(()) => Ok(()),
            Err(first_err) => {
                // The peer may be restarting; retry once on a fresh
                // connection, then give up on this record.
                state.stream = None;
                self.metrics.record_relay_reconnect();
                match self.send_framed(&mut state, &payload) {
                    Ok(()) => Ok(()),
                    Err(_) => {
                        state.stream = None;
                        self.report_drop(&first_err);
                        Err(DispatchError::relay(first_err.to_string()))
                    }
                }
            }
        }
    }

    fn flush(&self) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(ref mut stream) = state.stream {
            stream.flush().map_err(DispatchError::from)?;
        }
        Ok(())
    }

    fn close(&self) {
        // Shutting our end down lets the logger process drain and close.
        let mut state = self.state.lock();
        if let Some(stream) = state.stream.take() {
            let _ = stream.shutdown(std::net::Shutdown::Write);
        }
    }

    fn name(&self) -> &str {
        "process_relay"
    }
}
