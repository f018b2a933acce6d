//! Process-wide counters and gauges

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::snapshot::MetricsSnapshot;
use crate::window::CompletionWindow;

/// `f64` gauge stored as raw bits in an atomic
#[derive(Debug, Default)]
struct Gauge(AtomicU64);

impl Gauge {
    fn set(&self, value: f64) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

/// Shared metrics state for the whole service.
///
/// Counters are individually atomic. The completion window sits behind a
/// mutex that is only held for a push or a scan, never across processing.
#[derive(Debug)]
pub struct MetricsAggregator {
    queue_size: AtomicU64,
    active_connections: AtomicU64,
    total_processed: AtomicU64,
    errors: AtomicU64,
    cpu: Gauge,
    memory: Gauge,
    load_test_active: AtomicBool,
    completions: Mutex<CompletionWindow>,
}

impl MetricsAggregator {
    pub fn new(window: Duration) -> Self {
        Self {
            queue_size: AtomicU64::new(0),
            active_connections: AtomicU64::new(0),
            total_processed: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            cpu: Gauge::default(),
            memory: Gauge::default(),
            load_test_active: AtomicBool::new(false),
            completions: Mutex::new(CompletionWindow::new(window)),
        }
    }

    /// A job entered the queue
    pub fn job_enqueued(&self) {
        self.queue_size.fetch_add(1, Ordering::SeqCst);
    }

    /// A job left the queue, whatever its outcome
    pub fn job_dequeued(&self) {
        // Saturating: an unmatched dequeue must not wrap the gauge
        let _ = self
            .queue_size
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    pub fn job_succeeded(&self, duration: Duration) {
        self.total_processed.fetch_add(1, Ordering::SeqCst);
        self.completions.lock().record(Instant::now(), duration, true);
    }

    pub fn job_failed(&self, duration: Duration) {
        self.errors.fetch_add(1, Ordering::SeqCst);
        self.completions.lock().record(Instant::now(), duration, false);
    }

    /// Track an in-flight HTTP request until the returned guard is dropped
    pub fn connection_opened(self: &Arc<Self>) -> ConnectionGuard {
        self.active_connections.fetch_add(1, Ordering::SeqCst);
        ConnectionGuard {
            aggregator: Arc::clone(self),
        }
    }

    pub fn publish_cpu(&self, percent: f64) {
        self.cpu.set(sanitize_percent(percent));
    }

    pub fn publish_memory(&self, percent: f64) {
        self.memory.set(sanitize_percent(percent));
    }

    /// Hand the CPU gauge to (or back from) the load test controller
    pub fn set_load_test_active(&self, active: bool) {
        self.load_test_active.store(active, Ordering::SeqCst);
    }

    pub fn load_test_active(&self) -> bool {
        self.load_test_active.load(Ordering::SeqCst)
    }

    pub fn queue_size(&self) -> u64 {
        self.queue_size.load(Ordering::SeqCst)
    }

    pub fn active_connections(&self) -> u64 {
        self.active_connections.load(Ordering::SeqCst)
    }

    pub fn total_processed(&self) -> u64 {
        self.total_processed.load(Ordering::SeqCst)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::SeqCst)
    }

    pub fn cpu(&self) -> f64 {
        self.cpu.get()
    }

    /// Read every counter and recompute the windowed figures
    pub fn snapshot(&self) -> MetricsSnapshot {
        let (requests_per_second, avg_response_time) = {
            let now = Instant::now();
            let mut window = self.completions.lock();
            (window.requests_per_second(now), window.avg_response_ms(now))
        };

        MetricsSnapshot {
            cpu: round_one_decimal(self.cpu.get()),
            memory: round_one_decimal(self.memory.get()),
            requests_per_second,
            avg_response_time,
            queue_size: self.queue_size(),
            active_connections: self.active_connections(),
            total_processed: self.total_processed(),
            errors: self.errors(),
        }
    }
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

/// Decrements `activeConnections` when the request finishes
#[derive(Debug)]
pub struct ConnectionGuard {
    aggregator: Arc<MetricsAggregator>,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let _ = self.aggregator.active_connections.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |n| n.checked_sub(1),
        );
    }
}

fn sanitize_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
