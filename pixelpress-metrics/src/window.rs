//! Sliding window of recent job completions

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
struct Completion {
    at: Instant,
    duration: Duration,
    success: bool,
}

/// Trailing window over job completions.
///
/// Samples older than the window are pruned on every write and read, so the
/// buffer stays proportional to throughput times window length.
#[derive(Debug)]
pub struct CompletionWindow {
    window: Duration,
    samples: VecDeque<Completion>,
}

impl CompletionWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            window: window.max(Duration::from_millis(1)),
            samples: VecDeque::new(),
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Record a completed job at `at`
    pub fn record(&mut self, at: Instant, duration: Duration, success: bool) {
        self.samples.push_back(Completion {
            at,
            duration,
            success,
        });
        self.prune(at);
    }

    /// Drop samples that fell out of the window ending at `now`
    pub fn prune(&mut self, now: Instant) {
        while let Some(front) = self.samples.front() {
            if now.saturating_duration_since(front.at) > self.window {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Completions (successful or failed) per second in the window
    pub fn requests_per_second(&mut self, now: Instant) -> f64 {
        self.prune(now);
        let rate = self.samples.len() as f64 / self.window.as_secs_f64();
        (rate * 100.0).round() / 100.0
    }

    /// Mean processing time of successful completions in the window, ms
    pub fn avg_response_ms(&mut self, now: Instant) -> u64 {
        self.prune(now);
        let (count, total) = self
            .samples
            .iter()
            .filter(|c| c.success)
            .fold((0u64, Duration::ZERO), |(n, sum), c| (n + 1, sum + c.duration));

        if count == 0 {
            return 0;
        }
        (total.as_millis() / count as u128) as u64
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_reports_zero() {
        let mut window = CompletionWindow::new(Duration::from_secs(10));
        let now = Instant::now();
        assert_eq!(window.requests_per_second(now), 0.0);
        assert_eq!(window.avg_response_ms(now), 0);
    }

    #[test]
    fn test_rate_and_average() {
        let mut window = CompletionWindow::new(Duration::from_secs(10));
        let start = Instant::now();
        window.record(start, Duration::from_millis(100), true);
        window.record(start, Duration::from_millis(300), true);
        window.record(start, Duration::from_millis(900), false);

        assert_eq!(window.requests_per_second(start), 0.3);
        // failed job does not count towards latency
        assert_eq!(window.avg_response_ms(start), 200);
    }

    #[test]
    fn test_old_samples_are_pruned() {
        let mut window = CompletionWindow::new(Duration::from_secs(10));
        let start = Instant::now();
        window.record(start, Duration::from_millis(1000), true);
        window.record(start + Duration::from_secs(8), Duration::from_millis(10), true);

        let later = start + Duration::from_secs(12);
        assert_eq!(window.avg_response_ms(later), 10);
        assert_eq!(window.len(), 1);

        let much_later = start + Duration::from_secs(30);
        assert_eq!(window.requests_per_second(much_later), 0.0);
        assert!(window.is_empty());
    }
}
