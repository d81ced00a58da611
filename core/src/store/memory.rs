//! In-memory revocation store for testing and single-process deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::RevocationRecord;
use crate::errors::RevocationResult;

use super::r#trait::{validate_key, RevocationStore};

/// Revocation store backed by a shared in-process map.
///
/// Cloning yields another handle onto the same backing map.
/// [`share_with_prefix`](Self::share_with_prefix) produces a handle with a
/// different namespace over the same map, which is how multi-tenant key
/// isolation is exercised in tests.
#[derive(Clone)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<String, RevocationRecord>>>,
    prefix: String,
}

impl MemoryStore {
    /// Create a store with an empty namespace prefix.
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    /// Create a store whose keys live under the given namespace prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            prefix: prefix.into(),
        }
    }

    /// A handle over the same backing map under a different namespace.
    pub fn share_with_prefix(&self, prefix: impl Into<String>) -> Self {
        Self {
            records: Arc::clone(&self.records),
            prefix: prefix.into(),
        }
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevocationStore for MemoryStore {
    async fn put(&self, key: &str, record: &RevocationRecord) -> RevocationResult<()> {
        validate_key(key)?;
        let mut records = self.records.write().await;
        records.insert(self.namespaced(key), record.clone());
        Ok(())
    }

    async fn get(&self, key: &str) -> RevocationResult<Option<RevocationRecord>> {
        validate_key(key)?;
        let records = self.records.read().await;
        Ok(records.get(&self.namespaced(key)).cloned())
    }

    async fn scan_keys(&self) -> RevocationResult<Vec<String>> {
        let records = self.records.read().await;
        Ok(records
            .keys()
            .filter_map(|key| key.strip_prefix(&self.prefix))
            .map(str::to_string)
            .collect())
    }

    async fn delete(&self, key: &str) -> RevocationResult<()> {
        validate_key(key)?;
        let mut records = self.records.write().await;
        records.remove(&self.namespaced(key));
        Ok(())
    }

    async fn flush_all(&self) -> RevocationResult<()> {
        let mut records = self.records.write().await;
        records.clear();
        Ok(())
    }
}
