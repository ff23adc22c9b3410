//! Error types for benchmark runs.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("kvstore client error: {0}")]
    Client(#[from] kvstore_client::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("benchmark worker failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}
