//! # Key-Value Port
//!
//! The persistence contract the state containers are written against:
//! get/set/remove by namespaced string key, string values. The containers
//! never know whether they are talking to the SQLite kv table or an
//! in-memory map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use thiserror::Error;

/// Persistence backend failure.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type alias for port operations.
pub type KvResult<T> = Result<T, KvError>;

/// The key-value persistence port.
///
/// Values are opaque strings; the containers store JSON blobs under
/// distinct namespaced keys.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;

    /// Removes the value stored under `key`. Missing keys are a no-op.
    async fn remove(&self, key: &str) -> KvResult<()>;
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// In-memory [`KeyValueStore`] for tests and cache-less operation.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let entries = self.entries.lock().expect("kv map mutex poisoned");
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut entries = self.entries.lock().expect("kv map mutex poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        let mut entries = self.entries.lock().expect("kv map mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// SQLite-Backed Store
// =============================================================================

/// [`KeyValueStore`] backed by the kv table in the cache database.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    kv: lemon_db::KvRepository,
}

impl SqliteStore {
    /// Creates a store over the given database handle.
    pub fn new(db: &lemon_db::Database) -> Self {
        SqliteStore { kv: db.kv() }
    }
}

impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        self.kv
            .get(key)
            .await
            .map_err(|e| KvError::Backend(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        self.kv
            .set(key, value)
            .await
            .map_err(|e| KvError::Backend(e.to_string()))
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        self.kv
            .remove(key)
            .await
            .map_err(|e| KvError::Backend(e.to_string()))
    }
}
