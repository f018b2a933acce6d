pub mod health;
pub mod load_test;
pub mod metrics;
pub mod process;

// Re-export handler functions
pub use health::*;
pub use load_test::*;
pub use metrics::*;
pub use process::*;
