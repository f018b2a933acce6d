use thiserror::Error;
use uuid::Uuid;

pub type LoadTestResult<T> = Result<T, LoadTestError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadTestError {
    #[error("Invalid load test configuration: {0}")]
    Validation(String),

    #[error("Load test {0} is already running")]
    AlreadyRunning(Uuid),

    #[error("Failed to start load worker: {0}")]
    WorkerSpawn(String),
}
