//! Background publisher for the idle CPU baseline and memory gauge

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::aggregator::MetricsAggregator;
use crate::system::SystemSampler;

/// Periodically samples host resources into the aggregator.
///
/// Memory is always published. CPU is published only while no load test
/// owns the gauge, so the dashboard sees the idle baseline between runs.
pub struct ResourceMonitor {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ResourceMonitor {
    /// Spawn the monitor on the current tokio runtime
    pub fn spawn(aggregator: Arc<MetricsAggregator>, interval: Duration) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            info!("Resource monitor started with {}ms interval", interval.as_millis());
            let mut sampler = SystemSampler::new();
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let sample = sampler.sample();
                        aggregator.publish_memory(sample.memory_percent);
                        if !aggregator.load_test_active() {
                            aggregator.publish_cpu(sample.cpu_percent);
                        }
                        debug!(cpu = sample.cpu_percent, memory = sample.memory_percent, "Resource sample");
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("Resource monitor stopped");
        });

        Self { shutdown, handle }
    }

    /// Stop the monitor and wait for its task to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
