//! Load generator for the kvstore service.
//!
//! `kvstore-bench` drives put, get and delete calls through
//! [`kvstore_client::Client`], records per-call latency, and writes a
//! timestamped CSV report with throughput, error rate and latency
//! percentiles for each operation.
//!
//! # Example
//!
//! ```no_run
//! use kvstore_bench::{run_benchmarks, BenchConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BenchConfig {
//!         tag: Some("baseline".to_string()),
//!         ..BenchConfig::default()
//!     };
//!     let path = run_benchmarks(&config).await?;
//!     println!("report written to {}", path.display());
//!     Ok(())
//! }
//! ```

mod config;
mod error;
pub mod report;
mod runner;
pub mod stats;

pub use config::BenchConfig;
pub use error::Error;
pub use runner::{run_benchmarks, run_operation, OperationReport};
pub use stats::{Sample, Summary};
