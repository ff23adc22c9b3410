//! In-memory key-value store exposed over gRPC.
//!
//! A [`Store`] is an explicitly owned, thread-safe map from byte-string keys
//! to byte-string values. The [`grpc`] module binds it to the `Put`, `Get`
//! and `Delete` RPCs, and [`server`] runs that service on a TCP listener.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use kvstore_server::{server, ServerConfig, Store};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::default();
//!     let store = Arc::new(Store::with_backend(config.backend, config.capacity));
//!     server::serve(&config, store, async {
//!         tokio::signal::ctrl_c().await.ok();
//!     })
//!     .await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod grpc;
pub mod server;
pub mod store;

pub use config::{BackendKind, ServerConfig};
pub use error::ServerError;
pub use server::ServerHandle;
pub use store::Store;
