//! # Key/Value Store Contract
//!
//! The persistence collaborator seen by the cart: a string-keyed store of
//! string values, like browser local storage.
//!
//! - `get` returns `None` for a key that was never written
//! - `set` overwrites the whole value

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};

/// A string-keyed store of string values.
#[async_trait]
pub trait PersistentStore: Send + Sync {
    /// Reads the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// In-memory store, used by tests and the `memory` storage backend.
///
/// Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StoreError {
    StoreError::Internal("memory store lock poisoned".to_string())
}

#[async_trait]
impl PersistentStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
