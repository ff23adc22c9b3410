use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use kvstore_server::config::{Args, ServerConfig};
use kvstore_server::{server, Store};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Args::parse());
    let store = Arc::new(Store::with_backend(config.backend, config.capacity));

    if let Err(e) = server::serve(&config, store, shutdown_signal()).await {
        error!(error = %e, "failed to run server");
        std::process::exit(1);
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received ctrl-c, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for ctrl-c, serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
