use crate::store::Store;
use kvstore_types::kv::{
    key_value_store_server::{KeyValueStore, KeyValueStoreServer},
    DeleteRequest, DeleteResponse, GetRequest, GetResponse, PutRequest, PutResponse,
};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use tracing::debug;

/// gRPC front of a [`Store`]. Holds no per-call state; each RPC is one
/// store operation.
#[derive(Clone)]
pub struct KeyValueServiceImpl {
    store: Arc<Store>,
}

impl KeyValueServiceImpl {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[tonic::async_trait]
impl KeyValueStore for KeyValueServiceImpl {
    async fn put(&self, request: Request<PutRequest>) -> Result<Response<PutResponse>, Status> {
        let req = request.into_inner();
        debug!(key_len = req.key.len(), value_len = req.value.len(), "put");

        // Empty and oversized keys are accepted as-is.
        self.store.put(req.key, req.value);

        Ok(Response::new(PutResponse {
            success: true,
            error: String::new(),
        }))
    }

    async fn get(&self, request: Request<GetRequest>) -> Result<Response<GetResponse>, Status> {
        let req = request.into_inner();

        let response = match self.store.get(&req.key) {
            Some(value) => GetResponse {
                value,
                found: true,
                error: String::new(),
            },
            None => GetResponse {
                value: Vec::new(),
                found: false,
                error: String::new(),
            },
        };
        debug!(key_len = req.key.len(), found = response.found, "get");

        Ok(Response::new(response))
    }

    async fn delete(
        &self,
        request: Request<DeleteRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let req = request.into_inner();
        let existed = self.store.delete(&req.key);
        debug!(key_len = req.key.len(), existed, "delete");

        Ok(Response::new(DeleteResponse {
            success: existed,
            error: String::new(),
        }))
    }
}

pub fn create_server(store: Arc<Store>) -> KeyValueStoreServer<KeyValueServiceImpl> {
    KeyValueStoreServer::new(KeyValueServiceImpl::new(store))
}
