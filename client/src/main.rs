use clap::Parser;
use tracing::{error, info};

use kvstore_client::Client;

/// Connects to a kvstore server and runs a put, get and delete.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The server address
    #[arg(long, default_value = "localhost:50051")]
    server: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args.server).await {
        error!(error = %e, kind = ?e.kind(), "client failed");
        std::process::exit(1);
    }
}

async fn run(server: &str) -> Result<(), kvstore_client::Error> {
    let client = Client::connect(server).await?;
    info!(server, "connected");

    let key = "test-key";
    let value = "test-value";

    client.put(key, value).await?;
    println!("Put key: {}", key);

    match client.get(key).await? {
        Some(retrieved) => println!("Got value: {}", String::from_utf8_lossy(&retrieved)),
        None => println!("Key not found: {}", key),
    }

    if client.delete(key).await? {
        println!("Deleted key: {}", key);
    } else {
        println!("Key already absent: {}", key);
    }

    client.close()
}
