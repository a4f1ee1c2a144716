//! Dispatch metrics for observability
//!
//! Atomic counters used to bound self-reports and to let tests assert
//! resilience behavior without inspecting stderr.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug)]
pub struct DispatchMetrics {
    /// Records that reached every attached handler without error
    emitted: AtomicU64,

    /// Handler write failures (contained, never propagated)
    sink_failures: AtomicU64,

    /// Records dropped after retries were exhausted
    dropped: AtomicU64,

    /// Times a producer blocked on a full writer queue
    queue_blocks: AtomicU64,

    /// Reconnect attempts made by the process-offload relay
    relay_reconnects: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            queue_blocks: AtomicU64::new(0),
            relay_reconnects: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn queue_blocks(&self) -> u64 {
        self.queue_blocks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn relay_reconnects(&self) -> u64 {
        self.relay_reconnects.load(Ordering::Relaxed)
    }

    /// Returns the previous value, so callers can alert on the first event
    /// and every Nth thereafter.
    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_queue_block(&self) -> u64 {
        self.queue_blocks.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_relay_reconnect(&self) -> u64 {
        self.relay_reconnects.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
