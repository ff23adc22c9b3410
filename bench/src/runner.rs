//! Drives load against a server and times each call.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use kvstore_client::{Client, Operation};
use tracing::{info, warn};

use crate::config::BenchConfig;
use crate::error::Error;
use crate::report;
use crate::stats::{Sample, Summary};

const BENCH_KEY: &str = "key-0";
const BENCH_VALUE: &str = "value-0";

/// Results for one operation.
#[derive(Debug, Clone)]
pub struct OperationReport {
    pub operation: Operation,
    pub concurrency: usize,
    pub summary: Summary,
}

/// Issues `config.requests` calls of `operation`, keeping
/// `config.concurrency` of them in flight.
///
/// Any `Err` from the client counts as a failed call; `get` misses and
/// `delete` of an absent key are successes.
pub async fn run_operation(
    client: &Client,
    operation: Operation,
    config: &BenchConfig,
) -> Result<OperationReport, Error> {
    if config.concurrency == 0 {
        return Err(Error::ZeroConcurrency);
    }

    let issued = Arc::new(AtomicUsize::new(0));
    let started = Instant::now();

    let workers = (0..config.concurrency).map(|_| {
        let client = client.clone();
        let issued = Arc::clone(&issued);
        let requests = config.requests;
        tokio::spawn(async move {
            let mut samples = Vec::new();
            while issued.fetch_add(1, Ordering::Relaxed) < requests {
                let call_started = Instant::now();
                let result = call(&client, operation).await;
                let latency = call_started.elapsed();
                if let Err(e) = &result {
                    warn!(%operation, error = %e, "call failed");
                }
                samples.push(Sample {
                    latency,
                    ok: result.is_ok(),
                });
            }
            samples
        })
    });

    let mut samples = Vec::with_capacity(config.requests);
    for worker in join_all(workers).await {
        samples.extend(worker?);
    }
    let summary = Summary::from_samples(&samples, started.elapsed());

    info!(
        %operation,
        count = summary.count,
        errors = summary.error_count,
        rps = summary.rps,
        "operation finished"
    );

    Ok(OperationReport {
        operation,
        concurrency: config.concurrency,
        summary,
    })
}

async fn call(client: &Client, operation: Operation) -> Result<(), kvstore_client::Error> {
    match operation {
        Operation::Put => client.put(BENCH_KEY, BENCH_VALUE).await,
        Operation::Get => client.get(BENCH_KEY).await.map(|_| ()),
        Operation::Delete => client.delete(BENCH_KEY).await.map(|_| ()),
    }
}

/// Benchmarks put, get and delete in that order and writes the CSV report.
/// Returns the report's path.
pub async fn run_benchmarks(config: &BenchConfig) -> Result<PathBuf, Error> {
    let client = Client::connect(config.server.as_str()).await?;
    info!(
        server = %config.server,
        concurrency = config.concurrency,
        requests = config.requests,
        "starting benchmark"
    );

    let mut reports = Vec::new();
    for operation in [Operation::Put, Operation::Get, Operation::Delete] {
        reports.push(run_operation(&client, operation, config).await?);
    }

    let path = report::write_csv(&reports, config)?;
    info!(path = %path.display(), "results saved");
    Ok(path)
}
