//! Jobs, uploads and batch results

use pixelpress_imaging::FilterKind;
use serde::Serialize;
use std::time::Instant;
use tokio::sync::oneshot;
use uuid::Uuid;

/// One uploaded file as received from the client
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(filename: impl Into<Option<String>>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }
}

pub(crate) type JobReply = Result<ImageResult, String>;

/// A unit of work owned by the queue from enqueue until its reply is sent
#[derive(Debug)]
pub struct ImageJob {
    pub id: Uuid,
    pub bytes: Vec<u8>,
    pub filter: FilterKind,
    pub enqueued_at: Instant,
    pub(crate) reply: oneshot::Sender<JobReply>,
}

/// A successfully processed image
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    #[serde(skip)]
    pub id: Uuid,
    pub original: String,
    pub processed: String,
    #[serde(rename = "processingTime")]
    pub processing_time_ms: u64,
    #[serde(skip)]
    pub width: u32,
    #[serde(skip)]
    pub height: u32,
}

/// An image that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobFailure {
    /// Position of the image in the submitted batch
    pub index: usize,
    pub filename: Option<String>,
    pub reason: String,
}

/// Everything a batch produced, in submission order
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub results: Vec<ImageResult>,
    pub failures: Vec<JobFailure>,
}

impl BatchOutcome {
    pub fn submitted(&self) -> usize {
        self.results.len() + self.failures.len()
    }
}
