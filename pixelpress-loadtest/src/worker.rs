//! Load thread body

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::config::Intensity;
use crate::signal::CancellationSignal;

const SLICE: Duration = Duration::from_millis(100);

/// Burn CPU in duty-cycled slices until cancelled. Returns operations done.
pub(crate) fn run(intensity: Intensity, signal: &CancellationSignal) -> u64 {
    let busy = SLICE.mul_f64(intensity.duty_cycle());
    let chunk = intensity.chunk_size();
    let mut rng = fastrand::Rng::new();
    let mut acc = 0.0f64;
    let mut ops = 0u64;

    'slices: while !signal.is_cancelled() {
        let slice_start = Instant::now();

        while slice_start.elapsed() < busy {
            if signal.is_cancelled() {
                break 'slices;
            }
            acc = burn(&mut rng, chunk, acc);
            ops += chunk as u64;
        }

        let rest = SLICE.saturating_sub(slice_start.elapsed());
        if !rest.is_zero() && signal.wait_timeout(rest) {
            break;
        }
    }

    black_box(acc);
    ops
}

fn burn(rng: &mut fastrand::Rng, ops: usize, seed: f64) -> f64 {
    let mut acc = seed;
    for _ in 0..ops {
        let x = rng.f64() * 1000.0;
        acc += (x.sqrt() * x.sin()).abs();
    }
    black_box(acc) % 1.0e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_worker_stops_promptly() {
        for intensity in [Intensity::Low, Intensity::Extreme] {
            let signal = Arc::new(CancellationSignal::new());
            let handle = {
                let signal = Arc::clone(&signal);
                std::thread::spawn(move || run(intensity, &signal))
            };

            std::thread::sleep(Duration::from_millis(150));
            let cancelled_at = Instant::now();
            signal.cancel();
            let ops = handle.join().unwrap();

            assert!(ops > 0);
            assert!(cancelled_at.elapsed() < Duration::from_millis(500));
        }
    }
}
