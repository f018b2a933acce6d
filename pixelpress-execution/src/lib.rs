//! Image processing execution for Pixelpress
//!
//! [`ProcessingPool`] owns a fixed set of OS worker threads that pull
//! [`ImageJob`]s from one bounded channel. Callers submit a whole batch and
//! await its [`BatchOutcome`]; filter work never runs on the async runtime.

pub mod error;
pub mod job;
pub mod pool;
mod worker;

pub use error::{ProcessingError, ProcessingResult};
pub use job::{BatchOutcome, ImageJob, ImageResult, ImageUpload, JobFailure};
pub use pool::{PoolConfig, ProcessingPool};
