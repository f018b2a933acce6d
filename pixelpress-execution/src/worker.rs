//! Worker thread loop

use parking_lot::Mutex;
use pixelpress_imaging::{process_image, ImageFormat};
use pixelpress_metrics::MetricsAggregator;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::job::{ImageJob, ImageResult, JobReply};

pub(crate) type SharedReceiver = Arc<Mutex<mpsc::Receiver<ImageJob>>>;

/// Pull jobs until every sender is gone and the channel is drained
pub(crate) fn run(
    worker_id: usize,
    receiver: SharedReceiver,
    aggregator: Arc<MetricsAggregator>,
    output: ImageFormat,
) {
    debug!("Worker {} started", worker_id);

    loop {
        let job = {
            let mut rx = receiver.lock();
            rx.blocking_recv()
        };
        let Some(job) = job else {
            break;
        };

        let reply = execute(&job, &aggregator, output);
        aggregator.job_dequeued();

        if job.reply.send(reply).is_err() {
            debug!("Caller for job {} went away before completion", job.id);
        }
    }

    debug!("Worker {} stopped", worker_id);
}

fn execute(job: &ImageJob, aggregator: &MetricsAggregator, output: ImageFormat) -> JobReply {
    let waited = job.enqueued_at.elapsed();
    let started = Instant::now();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        process_image(&job.bytes, job.filter, output)
    }));
    let elapsed = started.elapsed();

    match outcome {
        Ok(Ok(processed)) => {
            aggregator.job_succeeded(elapsed);
            debug!(
                job_id = %job.id,
                filter = %job.filter,
                width = processed.width,
                height = processed.height,
                queued_ms = waited.as_millis() as u64,
                "Processed image in {}ms",
                elapsed.as_millis()
            );
            Ok(ImageResult {
                id: job.id,
                original: processed.original_uri,
                processed: processed.processed_uri,
                processing_time_ms: elapsed.as_millis() as u64,
                width: processed.width,
                height: processed.height,
            })
        }
        Ok(Err(e)) => {
            aggregator.job_failed(elapsed);
            warn!(job_id = %job.id, "Image processing failed: {}", e);
            Err(e.to_string())
        }
        Err(_) => {
            aggregator.job_failed(elapsed);
            warn!(job_id = %job.id, "Image processing panicked");
            Err("internal error while processing image".to_string())
        }
    }
}
