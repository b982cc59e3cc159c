// Library interface for fitstats modules
// This allows integration tests and benches to access the core functionality

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod packages;
pub mod report;
pub mod training;

// Re-export commonly used types for convenience
pub use models::*;
pub use training::{read_package, Training};
pub use report::{InfoMessage, OutputFormat};
pub use packages::{demo_packages, process_packages, BatchOutcome, PackageSource};
pub use error::{FitStatsError, Result};
pub use logging::{LogConfig, LogLevel, LogFormat};
