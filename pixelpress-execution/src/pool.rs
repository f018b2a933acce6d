//! Fixed-size processing pool

use parking_lot::Mutex;
use pixelpress_config::{OutputFormat, ProcessingConfig};
use pixelpress_imaging::{FilterKind, ImageFormat};
use pixelpress_metrics::MetricsAggregator;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Instant;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{ProcessingError, ProcessingResult};
use crate::job::{BatchOutcome, ImageJob, ImageUpload, JobFailure};
use crate::worker;

/// Configuration for the worker pool
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub max_batch_size: usize,
    pub output_format: ImageFormat,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: num_cpus::get(),
            queue_capacity: 64,
            max_batch_size: 32,
            output_format: ImageFormat::Jpeg,
        }
    }
}

impl From<&ProcessingConfig> for PoolConfig {
    fn from(config: &ProcessingConfig) -> Self {
        let worker_count = match config.worker_count {
            0 => num_cpus::get(),
            n => n,
        };
        let output_format = match config.output_format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        };
        Self {
            worker_count,
            queue_capacity: config.queue_capacity,
            max_batch_size: config.max_batch_size,
            output_format,
        }
    }
}

/// Bounded queue feeding a fixed number of worker threads
pub struct ProcessingPool {
    config: PoolConfig,
    sender: Mutex<Option<mpsc::Sender<ImageJob>>>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    aggregator: Arc<MetricsAggregator>,
}

impl ProcessingPool {
    /// Spawn the worker threads and open the queue
    pub fn new(config: PoolConfig, aggregator: Arc<MetricsAggregator>) -> ProcessingResult<Self> {
        let worker_count = config.worker_count.max(1);
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let receiver = Arc::new(Mutex::new(receiver));

        let mut workers = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            let receiver = Arc::clone(&receiver);
            let aggregator = Arc::clone(&aggregator);
            let output = config.output_format;
            let handle = std::thread::Builder::new()
                .name(format!("pixelpress-worker-{}", worker_id))
                .spawn(move || worker::run(worker_id, receiver, aggregator, output))
                .map_err(|e| {
                    ProcessingError::WorkerError(format!("failed to spawn worker {}: {}", worker_id, e))
                })?;
            workers.push(handle);
        }

        info!(
            "Started {} image workers (queue capacity {}, max batch {})",
            worker_count, config.queue_capacity, config.max_batch_size
        );

        Ok(Self {
            config: PoolConfig {
                worker_count,
                ..config
            },
            sender: Mutex::new(Some(sender)),
            workers: Mutex::new(workers),
            aggregator,
        })
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.sender.lock().is_some()
    }

    /// Process a batch and wait for every image to finish.
    ///
    /// Individual decode or encode failures land in
    /// [`BatchOutcome::failures`]; only batch-level problems are errors.
    pub async fn submit_batch(
        &self,
        uploads: Vec<ImageUpload>,
        filter: FilterKind,
    ) -> ProcessingResult<BatchOutcome> {
        if uploads.is_empty() {
            return Err(ProcessingError::Validation("No images provided".to_string()));
        }
        if uploads.len() > self.config.max_batch_size {
            return Err(ProcessingError::Capacity {
                submitted: uploads.len(),
                max: self.config.max_batch_size,
            });
        }

        let sender = self
            .sender
            .lock()
            .clone()
            .ok_or_else(|| ProcessingError::Unavailable("pool is shut down".to_string()))?;

        let batch_started = Instant::now();
        let mut pending = Vec::with_capacity(uploads.len());

        for upload in uploads {
            // Counted only once a slot is held; a cancelled wait leaves queueSize alone.
            let permit = sender
                .reserve()
                .await
                .map_err(|_| ProcessingError::Unavailable("worker queue closed".to_string()))?;

            let (reply, receiver) = oneshot::channel();
            self.aggregator.job_enqueued();
            permit.send(ImageJob {
                id: Uuid::new_v4(),
                bytes: upload.bytes,
                filter,
                enqueued_at: Instant::now(),
                reply,
            });
            pending.push((upload.filename, receiver));
        }
        drop(sender);

        let mut outcome = BatchOutcome::default();
        for (index, (filename, receiver)) in pending.into_iter().enumerate() {
            match receiver.await {
                Ok(Ok(result)) => outcome.results.push(result),
                Ok(Err(reason)) => outcome.failures.push(JobFailure {
                    index,
                    filename,
                    reason,
                }),
                Err(_) => {
                    return Err(ProcessingError::WorkerError(
                        "worker dropped a job without replying".to_string(),
                    ))
                }
            }
        }

        debug!(
            "Batch of {} ({} failed) with filter {} finished in {}ms",
            outcome.submitted(),
            outcome.failures.len(),
            filter,
            batch_started.elapsed().as_millis()
        );

        Ok(outcome)
    }

    /// Close the queue, let workers drain it and join them
    pub async fn shutdown(&self) {
        let sender = self.sender.lock().take();
        if sender.is_none() {
            return;
        }
        drop(sender);

        let workers: Vec<JoinHandle<()>> = std::mem::take(&mut *self.workers.lock());
        let count = workers.len();
        let joined = tokio::task::spawn_blocking(move || {
            for handle in workers {
                if handle.join().is_err() {
                    warn!("An image worker panicked during shutdown");
                }
            }
        })
        .await;

        if let Err(e) = joined {
            warn!("Failed to join image workers: {}", e);
        } else {
            info!("Processing pool stopped ({} workers joined)", count);
        }
    }
}

impl std::fmt::Debug for ProcessingPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessingPool")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish()
    }
}
