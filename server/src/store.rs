//! Thread-safe in-memory storage for byte-string keys and values.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;

use crate::config::BackendKind;

/// Map operations a [`Store`] backend must provide.
///
/// Every method takes `&self`; implementations synchronize internally and
/// each call is atomic with respect to the key it touches.
pub trait MapBackend: Send + Sync {
    fn insert(&self, key: Vec<u8>, value: Vec<u8>);
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    fn remove(&self, key: &[u8]) -> bool;
    fn contains(&self, key: &[u8]) -> bool;
    fn len(&self) -> usize;
    fn clear(&self);
}

/// A single `HashMap` behind one reader-writer lock.
pub struct LockedMap {
    inner: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl LockedMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }
}

// A panic while holding the lock cannot leave a half-applied entry behind,
// so a poisoned lock is still safe to use.
impl MapBackend for LockedMap {
    fn insert(&self, key: Vec<u8>, value: Vec<u8>) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert(key, value);
    }

    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(key).cloned()
    }

    fn remove(&self, key: &[u8]) -> bool {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        guard.remove(key).is_some()
    }

    fn contains(&self, key: &[u8]) -> bool {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        guard.contains_key(key)
    }

    fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// A `DashMap`: keys hash to independently locked shards.
pub struct ShardedMap {
    inner: DashMap<Vec<u8>, Vec<u8>>,
}

impl ShardedMap {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: DashMap::with_capacity(capacity),
        }
    }
}

impl MapBackend for ShardedMap {
    fn insert(&self, key: Vec<u8>, value: Vec<u8>) {
        self.inner.insert(key, value);
    }

    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: &[u8]) -> bool {
        self.inner.remove(key).is_some()
    }

    fn contains(&self, key: &[u8]) -> bool {
        self.inner.contains_key(key)
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn clear(&self) {
        self.inner.clear();
    }
}

/// The shared key-value mapping served by the gRPC service.
///
/// A `Store` is created empty and lives as long as its owner, usually an
/// `Arc<Store>` held by the server. Nothing is persisted.
///
/// Operations on the same key are linearized by the backend's locking;
/// operations on different keys have no relative ordering.
pub struct Store {
    backend: Box<dyn MapBackend>,
    kind: BackendKind,
}

impl Store {
    /// Creates an empty store on the default backend.
    pub fn new() -> Self {
        Self::with_backend(BackendKind::default(), 0)
    }

    /// Creates an empty store on `kind`, pre-sized for `capacity` entries.
    pub fn with_backend(kind: BackendKind, capacity: usize) -> Self {
        let backend: Box<dyn MapBackend> = match kind {
            BackendKind::Locked => Box::new(LockedMap::with_capacity(capacity)),
            BackendKind::Sharded => Box::new(ShardedMap::with_capacity(capacity)),
        };
        Self { backend, kind }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Inserts `value` under `key`, replacing any previous value.
    pub fn put(&self, key: Vec<u8>, value: Vec<u8>) {
        self.backend.insert(key, value);
    }

    /// Returns the current value for `key`, or `None` when it is absent.
    pub fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.backend.get(key)
    }

    /// Removes `key`. Returns whether an entry was present.
    pub fn delete(&self, key: &[u8]) -> bool {
        self.backend.remove(key)
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.backend.contains(key)
    }

    pub fn len(&self) -> usize {
        self.backend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.backend.clear();
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
