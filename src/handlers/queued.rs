//! Queued file writer
//!
//! A bounded queue in front of one writer thread that owns the sink
//! exclusively and drains in FIFO order, so a disk write never runs on the
//! producing scheduler thread. The producer-side policy is blocking
//! backpressure: when the queue is full the producer waits rather than
//! dropping, which is what keeps the per-channel ordering guarantee intact.

use crate::core::{
    DispatchError, DispatchMetrics, Handler, LineFormatter, LogLevel, LogRecord, Result,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Token in a configured path that expands to the record's level name.
const LEVEL_TOKEN: &str = "$level";

/// How many queued lines the writer drains per wakeup before flushing.
const BATCH_SIZE: usize = 64;

/// Timeout applied when joining the writer thread at close.
const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Destination for formatted lines. The seam between the queue machinery and
/// the actual file IO, owned exclusively by the writer thread.
pub trait LineSink: Send {
    fn write_line(&mut self, level: LogLevel, line: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Append-only file sink with `$level` path templating.
///
/// A templated path like `/var/log/app_$level.log` produces one file per
/// level, opened lazily on first use. A plain path opens a single file
/// eagerly so an unwritable destination surfaces at init.
pub struct FileSink {
    template: String,
    writers: HashMap<&'static str, BufWriter<File>>,
}

impl FileSink {
    pub fn new(path: &Path) -> Result<Self> {
        let template = path.to_string_lossy().into_owned();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DispatchError::file_handler(template.clone(), e.to_string())
                })?;
            }
        }

        let mut sink = Self {
            template,
            writers: HashMap::new(),
        };

        // Untemplated paths share one writer; open it now so configuration
        // errors surface at init rather than on the writer thread.
        if !sink.template.contains(LEVEL_TOKEN) {
            sink.writer_for(LogLevel::Info)?;
        }

        Ok(sink)
    }

    fn resolve_path(&self, level: LogLevel) -> PathBuf {
        PathBuf::from(self.template.replace(LEVEL_TOKEN, level.to_str_lower()))
    }

    fn writer_for(&mut self, level: LogLevel) -> Result<&mut BufWriter<File>> {
        let key = if self.template.contains(LEVEL_TOKEN) {
            level.to_str_lower()
        } else {
            "all"
        };

        if !self.writers.contains_key(key) {
            let path = self.resolve_path(level);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|e| {
                    DispatchError::file_handler(path.to_string_lossy(), e.to_string())
                })?;
            self.writers.insert(key, BufWriter::new(file));
        }

        Ok(self
            .writers
            .get_mut(key)
            .unwrap_or_else(|| unreachable!("writer inserted above")))
    }
}

impl LineSink for FileSink {
    fn write_line(&mut self, level: LogLevel, line: &str) -> io::Result<()> {
        let writer = self
            .writer_for(level)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    fn flush(&mut self) -> io::Result<()> {
        for writer in self.writers.values_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

enum WriterMsg {
    Line { level: LogLevel, line: String },
    Flush(Sender<()>),
}

/// Handler that formats records on the producing thread and hands the line
/// to the writer thread through a bounded queue.
pub struct QueuedFileHandler {
    min_level: LogLevel,
    formatter: LineFormatter,
    sender: RwLock<Option<Sender<WriterMsg>>>,
    handle: Mutex<Option<thread::JoinHandle<()>>>,
    flush_timeout: Duration,
    metrics: Arc<DispatchMetrics>,
}

impl QueuedFileHandler {
    /// File-backed handler; fails fast on an unusable path.
    pub fn file(
        path: &Path,
        min_level: LogLevel,
        capacity: usize,
        flush_timeout: Duration,
        metrics: Arc<DispatchMetrics>,
    ) -> Result<Self> {
        let sink = FileSink::new(path)?;
        Ok(Self::with_sink(
            Box::new(sink),
            min_level,
            capacity,
            flush_timeout,
            metrics,
        ))
    }

    /// Handler over an arbitrary sink. The sink moves to the writer thread
    /// and is owned by it exclusively from then on.
    pub fn with_sink(
        mut sink: Box<dyn LineSink>,
        min_level: LogLevel,
        capacity: usize,
        flush_timeout: Duration,
        metrics: Arc<DispatchMetrics>,
    ) -> Self {
        let (sender, receiver): (Sender<WriterMsg>, Receiver<WriterMsg>) = bounded(capacity);

        let writer_metrics = Arc::clone(&metrics);
        let handle = thread::Builder::new()
            .name("corolog-writer".to_string())
            .spawn(move || {
                let mut pending = 0usize;
                loop {
                    let msg = match receiver.recv() {
                        Ok(msg) => msg,
                        Err(_) => break,
                    };
                    pending += Self::apply(&mut sink, msg, &writer_metrics);

                    // Drain without blocking so bursts coalesce into one
                    // flush, then sync what we have.
                    while pending < BATCH_SIZE {
                        match receiver.try_recv() {
                            Ok(msg) => pending += Self::apply(&mut sink, msg, &writer_metrics),
                            Err(_) => break,
                        }
                    }
                    if pending > 0 {
                        Self::flush_sink(&mut sink, &writer_metrics);
                        pending = 0;
                    }
                }
                Self::flush_sink(&mut sink, &writer_metrics);
            })
            .ok();

        Self {
            min_level,
            formatter: LineFormatter::plain(),
            sender: RwLock::new(Some(sender)),
            handle: Mutex::new(handle),
            flush_timeout,
            metrics,
        }
    }

    /// Returns 1 for a written line, 0 otherwise.
    fn apply(sink: &mut Box<dyn LineSink>, msg: WriterMsg, metrics: &DispatchMetrics) -> usize {
        match msg {
            WriterMsg::Line { level, line } => {
                if let Err(e) = sink.write_line(level, &line) {
                    let previous = metrics.record_sink_failure();
                    if previous == 0 {
                        eprintln!("[corolog] file write failed: {}", e);
                    }
                    0
                } else {
                    1
                }
            }
            WriterMsg::Flush(ack) => {
                Self::flush_sink(sink, metrics);
                let _ = ack.send(());
                0
            }
        }
    }

    fn flush_sink(sink: &mut Box<dyn LineSink>, metrics: &DispatchMetrics) {
        if let Err(e) = sink.flush() {
            let previous = metrics.record_sink_failure();
            if previous == 0 {
                eprintln!("[corolog] file flush failed: {}", e);
            }
        }
    }

    fn send(&self, msg: WriterMsg) -> Result<()> {
        let guard = self.sender.read();
        let sender = guard.as_ref().ok_or(DispatchError::QueueClosed)?;
        match sender.try_send(msg) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(msg)) => {
                // Queue full: block the producer until space frees up.
                self.metrics.record_queue_block();
                sender.send(msg).map_err(|_| DispatchError::QueueClosed)
            }
            Err(TrySendError::Disconnected(_)) => Err(DispatchError::QueueClosed),
        }
    }
}

impl Handler for QueuedFileHandler {
    fn min_level(&self) -> LogLevel {
        self.min_level
    }

    fn write(&self, record: &LogRecord) -> Result<()> {
        let line = self.formatter.format(record);
        self.send(WriterMsg::Line {
            level: record.level,
            line,
        })
    }

    fn flush(&self) -> Result<()> {
        let (ack_tx, ack_rx) = bounded(1);
        self.send(WriterMsg::Flush(ack_tx))?;
        ack_rx
            .recv_timeout(self.flush_timeout)
            .map_err(|_| DispatchError::FlushTimeout {
                handler: self.name().to_string(),
            })
    }

    fn close(&self) {
        // Dropping the sender ends the writer loop after it drains.
        self.sender.write().take();

        if let Some(handle) = self.handle.lock().take() {
            let start = std::time::Instant::now();
            while !handle.is_finished() {
                if start.elapsed() >= JOIN_TIMEOUT {
                    eprintln!("[corolog] writer thread did not finish within {:?}", JOIN_TIMEOUT);
                    return;
                }
                thread::sleep(Duration::from_millis(10));
            }
            let _ = handle.join();
        }
    }

    fn name(&self) -> &str {
        "queued_file"
    }
}

impl Drop for QueuedFileHandler {
    fn drop(&mut self) {
        self.close();
    }
}
