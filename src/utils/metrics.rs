//! Observability and Metrics
//!
//! Counters for probe traffic seen by the datagram codec. The pure
//! encode/decode functions in [`crate::protocol::probe`] do not touch these;
//! only [`crate::core::codec::ProbeCodec`] records.
//!
//! Uses atomic counters for thread-safe metrics collection.

use crate::error::ProtocolError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Global metrics collector for probe operations
#[derive(Debug)]
pub struct Metrics {
    /// Probes successfully encoded
    pub probes_encoded: AtomicU64,
    /// Probes successfully decoded, signature mismatches included
    pub probes_decoded: AtomicU64,
    /// Decoded probes whose signature did not match
    pub signature_mismatches: AtomicU64,
    /// Datagrams too short for the probe header
    pub truncated_packets: AtomicU64,
    /// Datagrams carrying another packet identifier
    pub unexpected_packets: AtomicU64,
    /// Other decode failures
    pub decode_errors: AtomicU64,
    /// Probes rejected at encode time
    pub encode_errors: AtomicU64,
    /// Total bytes sent
    pub bytes_sent: AtomicU64,
    /// Total bytes received
    pub bytes_received: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self {
            probes_encoded: AtomicU64::new(0),
            probes_decoded: AtomicU64::new(0),
            signature_mismatches: AtomicU64::new(0),
            truncated_packets: AtomicU64::new(0),
            unexpected_packets: AtomicU64::new(0),
            decode_errors: AtomicU64::new(0),
            encode_errors: AtomicU64::new(0),
            bytes_sent: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record an encoded probe of `byte_count` wire bytes
    pub fn probe_encoded(&self, byte_count: u64) {
        self.probes_encoded.fetch_add(1, Ordering::Relaxed);
        self.bytes_sent.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a probe rejected by the encoder
    pub fn encode_error(&self) {
        self.encode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an incoming datagram, before decoding
    pub fn datagram_received(&self, byte_count: u64) {
        self.bytes_received.fetch_add(byte_count, Ordering::Relaxed);
    }

    pub fn probe_decoded(&self) {
        self.probes_decoded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn signature_mismatch(&self) {
        self.signature_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a decode failure under the matching counter
    pub fn decode_error(&self, error: &ProtocolError) {
        let counter = match error {
            ProtocolError::TruncatedPacket { .. } => &self.truncated_packets,
            ProtocolError::UnexpectedPacketId(_) => &self.unexpected_packets,
            _ => &self.decode_errors,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            probes_encoded: self.probes_encoded.load(Ordering::Relaxed),
            probes_decoded: self.probes_decoded.load(Ordering::Relaxed),
            signature_mismatches: self.signature_mismatches.load(Ordering::Relaxed),
            truncated_packets: self.truncated_packets.load(Ordering::Relaxed),
            unexpected_packets: self.unexpected_packets.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
            encode_errors: self.encode_errors.load(Ordering::Relaxed),
            bytes_sent: self.bytes_sent.load(Ordering::Relaxed),
            bytes_received: self.bytes_received.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            probes_encoded = snapshot.probes_encoded,
            probes_decoded = snapshot.probes_decoded,
            signature_mismatches = snapshot.signature_mismatches,
            truncated_packets = snapshot.truncated_packets,
            unexpected_packets = snapshot.unexpected_packets,
            decode_errors = snapshot.decode_errors,
            encode_errors = snapshot.encode_errors,
            bytes_sent = snapshot.bytes_sent,
            bytes_received = snapshot.bytes_received,
            uptime_seconds = snapshot.uptime_seconds,
            "Probe metrics snapshot"
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub probes_encoded: u64,
    pub probes_decoded: u64,
    pub signature_mismatches: u64,
    pub truncated_packets: u64,
    pub unexpected_packets: u64,
    pub decode_errors: u64,
    pub encode_errors: u64,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub uptime_seconds: u64,
}

/// Global metrics instance (lazy static for simplicity)
static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}

/// Timer for measuring operation duration
pub struct Timer {
    start: Instant,
    operation: &'static str,
}

impl Timer {
    /// Start timing an operation
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        debug!(
            operation = self.operation,
            duration_us = duration.as_micros() as u64,
            "Operation completed"
        );
    }
}
