//! Counters for the delivery pipeline.
//!
//! The HTTP client feeds the transport counters and the delivery client
//! feeds the per-message ones. Every clone of a [`Metrics`] handle shares the
//! same counters, so one handle can be passed to both.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    http_requests: AtomicU64,
    http_errors: AtomicU64,
    http_duration_ms: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
    retries: AtomicU64,
    cancellations: AtomicU64,
}

impl Counters {
    fn all(&self) -> [&AtomicU64; 7] {
        [
            &self.http_requests,
            &self.http_errors,
            &self.http_duration_ms,
            &self.delivered,
            &self.failed,
            &self.retries,
            &self.cancellations,
        ]
    }
}

fn bump(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

fn read(counter: &AtomicU64) -> u64 {
    counter.load(Ordering::Relaxed)
}

/// Shared handle to the pipeline counters.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// One finished HTTP exchange. `failed` covers transport errors and
    /// non-2xx statuses alike.
    pub fn record_http_request(&self, duration: Duration, failed: bool) {
        bump(&self.counters.http_requests);
        self.counters
            .http_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        if failed {
            bump(&self.counters.http_errors);
        }
    }

    pub fn record_email_delivered(&self) {
        bump(&self.counters.delivered);
    }

    /// A message whose retry budget ran out.
    pub fn record_email_failed(&self) {
        bump(&self.counters.failed);
    }

    pub fn record_retry(&self) {
        bump(&self.counters.retries);
    }

    pub fn record_cancellation(&self) {
        bump(&self.counters.cancellations);
    }

    pub fn http_requests_total(&self) -> u64 {
        read(&self.counters.http_requests)
    }

    pub fn http_errors_total(&self) -> u64 {
        read(&self.counters.http_errors)
    }

    pub fn emails_delivered_total(&self) -> u64 {
        read(&self.counters.delivered)
    }

    pub fn emails_failed_total(&self) -> u64 {
        read(&self.counters.failed)
    }

    pub fn retries_total(&self) -> u64 {
        read(&self.counters.retries)
    }

    pub fn cancellations_total(&self) -> u64 {
        read(&self.counters.cancellations)
    }

    pub fn reset(&self) {
        for counter in self.counters.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Point-in-time copy of every counter.
    pub fn summary(&self) -> MetricsSummary {
        let c = &self.counters;
        MetricsSummary {
            http_requests_total: read(&c.http_requests),
            http_errors_total: read(&c.http_errors),
            http_duration_total_ms: read(&c.http_duration_ms),
            emails_delivered_total: read(&c.delivered),
            emails_failed_total: read(&c.failed),
            retries_total: read(&c.retries),
            cancellations_total: read(&c.cancellations),
        }
    }
}

/// Counter values captured by [`Metrics::summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub emails_delivered_total: u64,
    pub emails_failed_total: u64,
    pub retries_total: u64,
    pub cancellations_total: u64,
}

impl MetricsSummary {
    /// Mean request duration, 0 when nothing was sent.
    pub fn http_duration_avg_ms(&self) -> f64 {
        if self.http_requests_total == 0 {
            return 0.0;
        }
        self.http_duration_total_ms as f64 / self.http_requests_total as f64
    }
}

/// Times one HTTP exchange and records it when finished.
pub struct HttpTimer {
    started: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn start(metrics: Metrics) -> Self {
        Self {
            started: Instant::now(),
            metrics,
        }
    }

    pub fn finish(self, ok: bool) {
        self.metrics
            .record_http_request(self.started.elapsed(), !ok);
    }
}
