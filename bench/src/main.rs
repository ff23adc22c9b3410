use std::path::PathBuf;

use clap::Parser;
use tracing::error;

use kvstore_bench::{run_benchmarks, BenchConfig};

/// Benchmarks put, get and delete against a kvstore server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// gRPC server address
    #[arg(long, default_value = "localhost:50051")]
    server: String,

    /// Number of concurrent requests
    #[arg(long, default_value_t = 50)]
    concurrency: usize,

    /// Total number of requests per operation
    #[arg(long, default_value_t = 1000)]
    requests: usize,

    /// Suffix for the report file name
    #[arg(long)]
    tag: Option<String>,

    /// Directory the report is written to
    #[arg(long, default_value = "results")]
    output_dir: PathBuf,
}

impl From<Args> for BenchConfig {
    fn from(args: Args) -> Self {
        Self {
            server: args.server,
            concurrency: args.concurrency,
            requests: args.requests,
            tag: args.tag,
            output_dir: args.output_dir,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = BenchConfig::from(Args::parse());

    match run_benchmarks(&config).await {
        Ok(path) => println!("Benchmarks completed. Results saved to {}", path.display()),
        Err(e) => {
            error!(error = %e, "benchmark failed");
            std::process::exit(1);
        }
    }
}
