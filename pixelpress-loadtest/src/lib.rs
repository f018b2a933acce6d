//! CPU load testing for Pixelpress
//!
//! A [`LoadTestController`] runs at most one load test at a time. Each run
//! spawns dedicated OS threads that burn CPU for a fraction of every 100ms
//! slice, while a supervisor task publishes CPU usage to the metrics
//! aggregator and ends the run when its duration elapses.

pub mod config;
pub mod controller;
pub mod error;
pub mod signal;
mod worker;

pub use config::{Intensity, LoadTestConfig};
pub use controller::{LoadTestController, LoadTestPhase, LoadTestStatus, StopOutcome};
pub use error::{LoadTestError, LoadTestResult};
pub use signal::CancellationSignal;
