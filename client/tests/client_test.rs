use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use kvstore_client::{Client, Error, ErrorKind, Operation};
use kvstore_server::{ServerConfig, ServerHandle, Store};
use kvstore_types::kv::key_value_store_server::{KeyValueStore, KeyValueStoreServer};
use kvstore_types::kv::{
    DeleteRequest, DeleteResponse, GetRequest, GetResponse, PutRequest, PutResponse,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

async fn start_test_server() -> (ServerHandle, Client) {
    let server = ServerHandle::start(
        "127.0.0.1:0".parse().unwrap(),
        ServerConfig::default(),
        Arc::new(Store::new()),
    )
    .await
    .unwrap();
    let client = Client::connect(server.local_addr()).await.unwrap();
    (server, client)
}

/// Answers every call with an application-level failure, optionally after
/// a delay.
struct RejectingService {
    delay: Duration,
}

#[tonic::async_trait]
impl KeyValueStore for RejectingService {
    async fn put(&self, _: Request<PutRequest>) -> Result<Response<PutResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        Ok(Response::new(PutResponse {
            success: false,
            error: "key too large".to_string(),
        }))
    }

    async fn get(&self, _: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        Ok(Response::new(GetResponse {
            value: Vec::new(),
            found: false,
            error: "bad key".to_string(),
        }))
    }

    async fn delete(&self, _: Request<DeleteRequest>) -> Result<Response<DeleteResponse>, Status> {
        tokio::time::sleep(self.delay).await;
        Ok(Response::new(DeleteResponse {
            success: false,
            error: "bad key".to_string(),
        }))
    }
}

async fn start_rejecting_server(delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(KeyValueStoreServer::new(RejectingService { delay }))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    addr
}

#[tokio::test]
async fn test_scenario_alpha() {
    let (server, client) = start_test_server().await;

    client.put("alpha", "1").await.unwrap();
    assert_eq!(client.get("alpha").await.unwrap(), Some(b"1".to_vec()));
    assert!(client.delete("alpha").await.unwrap());
    assert_eq!(client.get("alpha").await.unwrap(), None);
    assert!(!client.delete("alpha").await.unwrap());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_overwrite_last_write_wins() {
    let (server, client) = start_test_server().await;

    client.put("k", "v1").await.unwrap();
    client.put("k", "v2").await.unwrap();
    assert_eq!(client.get("k").await.unwrap(), Some(b"v2".to_vec()));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_delete_absent_is_ok_false() {
    let (server, client) = start_test_server().await;

    assert!(!client.delete("never-written").await.unwrap());
    assert!(!client.delete("never-written").await.unwrap());

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_key_and_value() {
    let (server, client) = start_test_server().await;

    client.put(Vec::<u8>::new(), Vec::<u8>::new()).await.unwrap();
    assert_eq!(client.get(Vec::<u8>::new()).await.unwrap(), Some(Vec::new()));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_binary_values() {
    let (server, client) = start_test_server().await;

    let value: Vec<u8> = (0..=255u8).collect();
    client.put(vec![0u8, 1, 2], value.clone()).await.unwrap();
    assert_eq!(client.get(vec![0u8, 1, 2]).await.unwrap(), Some(value));

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_concurrent_disjoint_keys() {
    let (server, client) = start_test_server().await;

    let puts: Vec<_> = (0..32)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .put(format!("concurrent_key_{i}"), format!("concurrent_value_{i}"))
                    .await
            })
        })
        .collect();
    for put in puts {
        put.await.unwrap().unwrap();
    }

    for i in 0..32 {
        let value = client.get(format!("concurrent_key_{i}")).await.unwrap();
        assert_eq!(value, Some(format!("concurrent_value_{i}").into_bytes()));
    }

    server.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_connect_unreachable_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Client::connect(addr).await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_invalid_address_is_transport_error() {
    let err = Client::connect("not a uri").await.err().unwrap();
    assert!(matches!(err, Error::InvalidAddress { .. }));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_call_after_server_shutdown_is_transport_error() {
    let (server, client) = start_test_server().await;
    client.put("k", "v").await.unwrap();

    server.shutdown().await.unwrap();

    let err = client.get("k").await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_response_errors_are_application_errors() {
    let addr = start_rejecting_server(Duration::ZERO).await;
    let client = Client::connect(addr).await.unwrap();

    let err = client.put("k", "v").await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Application);
    match err {
        Error::Application { op, message } => {
            assert_eq!(op, Operation::Put);
            assert_eq!(message, "key too large");
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = client.get("k").await.err().unwrap();
    assert!(err.is_application());

    let err = client.delete("k").await.err().unwrap();
    assert!(err.is_application());
}

#[tokio::test]
async fn test_deadline_is_transport_error() {
    let addr = start_rejecting_server(Duration::from_secs(2)).await;
    let client = Client::connect_with_timeout(addr, Duration::from_millis(200))
        .await
        .unwrap();

    let err = client.put("k", "v").await.err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn test_close() {
    let (server, client) = start_test_server().await;
    assert_eq!(client.timeout(), kvstore_client::CALL_TIMEOUT);
    client.close().unwrap();
    server.shutdown().await.unwrap();
}
