//! Running the key-value service on a TCP listener.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::grpc;
use crate::store::Store;

/// Serves `store` on [`ServerConfig::listen_addr`] until `shutdown` resolves.
pub async fn serve<F>(
    config: &ServerConfig,
    store: Arc<Store>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    let addr = config.listen_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    serve_with_listener(listener, config, store, shutdown).await
}

/// Serves `store` on an already bound listener until `shutdown` resolves.
///
/// In-flight calls are allowed to finish before this returns.
pub async fn serve_with_listener<F>(
    listener: TcpListener,
    config: &ServerConfig,
    store: Arc<Store>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send,
{
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, backend = ?store.kind(), "kvstore server listening");
    }

    // The server-side timeout is combined with any deadline the caller sends,
    // whichever is shorter.
    Server::builder()
        .timeout(config.request_timeout)
        .add_service(grpc::create_server(store))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    info!("kvstore server stopped");
    Ok(())
}

/// A server running on a background task.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<Result<(), ServerError>>,
}

impl ServerHandle {
    /// Binds `addr` and spawns the server. Port `0` picks a free port; see
    /// [`ServerHandle::local_addr`].
    pub async fn start(
        addr: SocketAddr,
        config: ServerConfig,
        store: Arc<Store>,
    ) -> Result<Self, ServerError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            serve_with_listener(listener, &config, store, async {
                shutdown_rx.await.ok();
            })
            .await
        });

        Ok(Self {
            local_addr,
            shutdown_tx,
            task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for the server task to exit.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        let _ = self.shutdown_tx.send(());
        self.task.await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_start_and_shutdown() {
        let store = Arc::new(Store::new());
        let handle = ServerHandle::start(
            "127.0.0.1:0".parse().unwrap(),
            ServerConfig::default(),
            store,
        )
        .await
        .unwrap();

        assert_ne!(handle.local_addr().port(), 0);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_bind_conflict_is_reported() {
        let first = ServerHandle::start(
            "127.0.0.1:0".parse().unwrap(),
            ServerConfig::default(),
            Arc::new(Store::new()),
        )
        .await
        .unwrap();

        let second = ServerHandle::start(
            first.local_addr(),
            ServerConfig::default(),
            Arc::new(Store::new()),
        )
        .await;
        assert!(matches!(second, Err(ServerError::Bind { .. })));

        first.shutdown().await.unwrap();
    }
}
