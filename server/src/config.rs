use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_PORT: u16 = 50051;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Map implementation backing the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// One `HashMap` behind a single reader-writer lock.
    Locked,
    /// Hash-sharded map with a lock per shard.
    #[default]
    Sharded,
}

/// Command-line arguments of the `kvstore-server` binary.
#[derive(Parser, Debug)]
#[command(author, version, about = "In-memory key-value store served over gRPC")]
pub struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Map implementation backing the store
    #[arg(long, value_enum, default_value_t = BackendKind::Sharded)]
    pub backend: BackendKind,

    /// Number of entries to pre-allocate room for
    #[arg(long, default_value_t = 0)]
    pub capacity: usize,

    /// Upper bound on the time a single request may take, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs(),
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub backend: BackendKind,
    pub capacity: usize,
    pub request_timeout: Duration,
}

impl ServerConfig {
    /// Address the server binds: every interface, on the configured port.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backend: BackendKind::default(),
            capacity: 0,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            port: args.port,
            backend: args.backend,
            capacity: args.capacity,
            request_timeout: Duration::from_secs(args.request_timeout_secs),
        }
    }
}
