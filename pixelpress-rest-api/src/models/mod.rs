pub mod common;
pub mod load_test;

pub use common::{HealthResponse, ServiceInfo};
pub use load_test::{StartLoadTestResponse, StopLoadTestResponse};
