//! In-process request counters exposed at `/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Service metrics
#[derive(Debug, Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // Init data outcomes
    pub init_accepted: AtomicU64,
    pub init_rejected: AtomicU64,
    pub init_decode_errors: AtomicU64,

    // Outbound messages
    pub messages_sent: AtomicU64,
    pub messages_failed: AtomicU64,

    // Latency tracking (sum and count, no histogram)
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request
    pub fn record_request(&self, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_init_accepted(&self) {
        self.init_accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_init_rejected(&self) {
        self.init_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_init_decode_error(&self) {
        self.init_decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_message(&self, delivered: bool) {
        if delivered {
            self.messages_sent.fetch_add(1, Ordering::Relaxed);
        } else {
            self.messages_failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
            },
            "init": {
                "accepted": self.init_accepted.load(Ordering::Relaxed),
                "rejected": self.init_rejected.load(Ordering::Relaxed),
                "decode_errors": self.init_decode_errors.load(Ordering::Relaxed),
            },
            "messages": {
                "sent": self.messages_sent.load(Ordering::Relaxed),
                "failed": self.messages_failed.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    pub fn finish(self, success: bool) -> u64 {
        let latency_ms = self.elapsed_ms();
        self.metrics.record_request(success, latency_ms);
        latency_ms
    }
}
