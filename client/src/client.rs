//! Typed client over the key-value gRPC service.

use std::future::Future;
use std::time::Duration;

use kvstore_types::kv::key_value_store_client::KeyValueStoreClient;
use kvstore_types::kv::{DeleteRequest, GetRequest, PutRequest};
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Response, Status};
use tracing::debug;

use crate::error::{Error, Operation};

/// Deadline applied to every call.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// A connection to a kvstore server.
///
/// Every call runs under a fixed deadline ([`CALL_TIMEOUT`] unless built with
/// [`Client::connect_with_timeout`]). The deadline is sent to the server as
/// `grpc-timeout` and enforced locally as well. When it fires the call
/// returns [`Error::Timeout`], but the server may still have applied the
/// operation. Nothing is retried.
///
/// `Client` is cheap to clone; clones share one underlying channel.
///
/// # Example
///
/// ```no_run
/// use kvstore_client::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = Client::connect("localhost:50051").await?;
///
///     client.put("alpha", "1").await?;
///     assert_eq!(client.get("alpha").await?, Some(b"1".to_vec()));
///
///     assert!(client.delete("alpha").await?);
///     assert!(!client.delete("alpha").await?);
///
///     client.close()?;
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: KeyValueStoreClient<Channel>,
    timeout: Duration,
}

impl Client {
    /// Connects to a kvstore server.
    ///
    /// The connection is established before this returns, so an unreachable
    /// address fails here rather than on the first call.
    ///
    /// # Arguments
    ///
    /// * `addr` - Server address (e.g., `"localhost:50051"`)
    pub async fn connect(addr: impl Into<ServerAddr>) -> Result<Self, Error> {
        Self::connect_with_timeout(addr, CALL_TIMEOUT).await
    }

    /// Like [`Client::connect`], with a custom per-call deadline. The same
    /// duration bounds the initial dial.
    pub async fn connect_with_timeout(
        addr: impl Into<ServerAddr>,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let server_addr = addr.into();
        let endpoint = Endpoint::from_shared(server_addr.uri())
            .map_err(|source| Error::InvalidAddress {
                addr: server_addr.0.clone(),
                source,
            })?
            .connect_timeout(timeout);
        let channel = endpoint.connect().await?;
        debug!(addr = %server_addr.0, "connected to kvstore server");

        Ok(Self {
            inner: KeyValueStoreClient::new(channel),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn put(
        &self,
        key: impl Into<Vec<u8>>,
        value: impl Into<Vec<u8>>,
    ) -> Result<(), Error> {
        let message = PutRequest {
            key: key.into(),
            value: value.into(),
        };
        let response = self
            .unary(message, |mut client, request| async move {
                client.put(request).await
            })
            .await?;

        if !response.success {
            return Err(Error::Application {
                op: Operation::Put,
                message: response.error,
            });
        }
        Ok(())
    }

    /// Fetches the value for `key`. `Ok(None)` means the key is absent.
    pub async fn get(&self, key: impl Into<Vec<u8>>) -> Result<Option<Vec<u8>>, Error> {
        let message = GetRequest { key: key.into() };
        let response = self
            .unary(message, |mut client, request| async move {
                client.get(request).await
            })
            .await?;

        if !response.error.is_empty() {
            return Err(Error::Application {
                op: Operation::Get,
                message: response.error,
            });
        }
        Ok(response.found.then_some(response.value))
    }

    /// Removes `key`. Returns whether it existed; removing an absent key is
    /// `Ok(false)`, not an error.
    pub async fn delete(&self, key: impl Into<Vec<u8>>) -> Result<bool, Error> {
        let message = DeleteRequest { key: key.into() };
        let response = self
            .unary(message, |mut client, request| async move {
                client.delete(request).await
            })
            .await?;

        if !response.error.is_empty() {
            return Err(Error::Application {
                op: Operation::Delete,
                message: response.error,
            });
        }
        Ok(response.success)
    }

    /// Releases this handle's connection. Other clones keep the channel open.
    pub fn close(self) -> Result<(), Error> {
        drop(self.inner);
        Ok(())
    }

    async fn unary<Req, Resp, F, Fut>(&self, message: Req, call: F) -> Result<Resp, Error>
    where
        F: FnOnce(KeyValueStoreClient<Channel>, Request<Req>) -> Fut,
        Fut: Future<Output = Result<Response<Resp>, Status>>,
    {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);

        match tokio::time::timeout(self.timeout, call(self.inner.clone(), request)).await {
            Ok(result) => Ok(result?.into_inner()),
            Err(_) => Err(Error::Timeout(self.timeout)),
        }
    }
}

/// Server address wrapper for type-safe connection.
///
/// A bare `host:port` is dialed over plain-text HTTP/2; an address that
/// already carries a scheme is used unchanged.
#[derive(Clone, Debug)]
pub struct ServerAddr(pub String);

impl ServerAddr {
    fn uri(&self) -> String {
        if self.0.contains("://") {
            self.0.clone()
        } else {
            format!("http://{}", self.0)
        }
    }
}

impl From<String> for ServerAddr {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ServerAddr {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<std::net::SocketAddr> for ServerAddr {
    fn from(addr: std::net::SocketAddr) -> Self {
        Self(addr.to_string())
    }
}
