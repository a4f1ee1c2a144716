//! Process-offload behavior exercised through the hub
#![cfg(unix)]

use corolog::prelude::*;
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixListener;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn relay_config(dir: &TempDir, socket: &str) -> LogConfig {
    LogConfig {
        level: LogLevel::Info,
        path: Some(dir.path().join("relayed.log")),
        logger_process: true,
        logger_process_socket: Some(dir.path().join(socket)),
        stdout: Some(false),
        flush_timeout_ms: 200,
        ..Default::default()
    }
}

#[test]
fn test_offloaded_lines_reach_the_logger_process() {
    let dir = TempDir::new().expect("tempdir");
    let socket = dir.path().join("logger.sock");
    let listener = UnixListener::bind(&socket).expect("bind");

    let reader = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        BufReader::new(stream)
            .lines()
            .map(|l| l.expect("line"))
            .collect::<Vec<_>>()
    });

    let hub = LoggerHub::new();
    hub.init(relay_config(&dir, "logger.sock")).expect("init");
    let logger = hub.default_logger();

    for i in 0..10 {
        logger.info(format!("request {}", i));
    }
    hub.shutdown();

    let lines = reader.join().expect("join");
    assert_eq!(lines.len(), 10);
    for (i, line) in lines.iter().enumerate() {
        assert!(line.contains(&format!("server.INFO: request {}", i)));
    }

    // Offload means this process never wrote the file itself.
    assert!(!dir.path().join("relayed.log").exists());
}

#[test]
fn test_unreachable_logger_process_never_blocks_callers() {
    let dir = TempDir::new().expect("tempdir");

    let hub = LoggerHub::new();
    hub.init(relay_config(&dir, "not-listening.sock")).expect("init");
    let logger = hub.default_logger();

    let start = Instant::now();
    for i in 0..50 {
        // Failures are contained inside the handler; the call never panics.
        logger.warning(format!("unroutable {}", i));
    }
    assert!(
        start.elapsed() < Duration::from_secs(5),
        "writes must fail fast when the peer is gone"
    );
    assert_eq!(hub.metrics().dropped(), 50);
    assert_eq!(hub.metrics().emitted(), 0);
}

#[test]
fn test_channel_lines_carry_their_channel_name() {
    let dir = TempDir::new().expect("tempdir");
    let socket = dir.path().join("logger.sock");
    let listener = UnixListener::bind(&socket).expect("bind");

    let reader = std::thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept");
        BufReader::new(stream)
            .lines()
            .map(|l| l.expect("line"))
            .collect::<Vec<_>>()
    });

    let hub = LoggerHub::new();
    hub.init(relay_config(&dir, "logger.sock")).expect("init");

    hub.channel("net").error("socket closed");
    hub.channel("storage").notice("compaction done");
    hub.shutdown();

    let lines = reader.join().expect("join");
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("net.ERROR: socket closed"));
    assert!(lines[1].contains("storage.NOTICE: compaction done"));
}
