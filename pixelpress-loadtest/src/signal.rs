//! Cancellation shared between the controller and its load threads

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// One-shot cancellation flag that also wakes threads parked in
/// [`CancellationSignal::wait_timeout`].
#[derive(Debug, Default)]
pub struct CancellationSignal {
    cancelled: AtomicBool,
    lock: Mutex<()>,
    condvar: Condvar,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        // Taken so a waiter cannot miss the wakeup between its check and its wait
        let _guard = self.lock.lock();
        self.condvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Sleep up to `timeout`; returns whether cancellation was requested
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut guard = self.lock.lock();
        if self.is_cancelled() {
            return true;
        }
        self.condvar.wait_for(&mut guard, timeout);
        self.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_wait_times_out() {
        let signal = CancellationSignal::new();
        let started = Instant::now();
        assert!(!signal.wait_timeout(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(25));
    }

    #[test]
    fn test_cancel_wakes_waiter() {
        let signal = Arc::new(CancellationSignal::new());
        let waiter = {
            let signal = Arc::clone(&signal);
            std::thread::spawn(move || {
                let started = Instant::now();
                let cancelled = signal.wait_timeout(Duration::from_secs(10));
                (cancelled, started.elapsed())
            })
        };

        std::thread::sleep(Duration::from_millis(20));
        signal.cancel();
        let (cancelled, waited) = waiter.join().unwrap();
        assert!(cancelled);
        assert!(waited < Duration::from_secs(5));
        assert!(signal.wait_timeout(Duration::from_secs(10)));
    }
}
