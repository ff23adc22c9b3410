//! Client for the kvstore gRPC service.
//!
//! [`Client`] wraps the generated gRPC stub with a fixed per-call deadline and
//! an error type that keeps transport failures apart from failures the
//! server reports in its responses.
//!
//! # Error classes
//!
//! - [`ErrorKind::Transport`]: the call itself failed (dial error, broken
//!   connection, deadline exceeded, non-OK status).
//! - [`ErrorKind::Application`]: the call succeeded but the response carried
//!   an `error` string or `success=false` on a put.
//!
//! A missing key is neither: `get` returns `Ok(None)` and `delete` returns
//! `Ok(false)`.
//!
//! # Example
//!
//! ```no_run
//! use kvstore_client::{Client, ErrorKind};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = match Client::connect("localhost:50051").await {
//!         Ok(client) => client,
//!         Err(e) => {
//!             assert_eq!(e.kind(), ErrorKind::Transport);
//!             return;
//!         }
//!     };
//!
//!     if let Err(e) = client.put("key", "value").await {
//!         match e.kind() {
//!             ErrorKind::Transport => eprintln!("call failed: {e}"),
//!             ErrorKind::Application => eprintln!("server rejected put: {e}"),
//!         }
//!     }
//! }
//! ```

mod client;
mod error;

pub use client::{Client, ServerAddr, CALL_TIMEOUT};
pub use error::{Error, ErrorKind, Operation};
