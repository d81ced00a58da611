//! Revocation store trait defining the key-value contract the cache builds on.

use async_trait::async_trait;

use crate::domain::RevocationRecord;
use crate::errors::{RevocationError, RevocationResult};

/// Reject empty keys before any store access.
pub fn validate_key(key: &str) -> RevocationResult<()> {
    if key.is_empty() {
        return Err(RevocationError::invalid_argument("key is empty"));
    }
    Ok(())
}

/// Key-value abstraction over hash-shaped revocation records under a
/// configured namespace prefix.
///
/// Implementations own connection lifecycle, retries, and wire protocol;
/// this layer performs no retries of its own. A single record read or write
/// is atomic; there is no multi-key transaction.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Write a whole record atomically, overwriting any existing record at
    /// that key. Fails with `InvalidArgument` on an empty key.
    async fn put(&self, key: &str, record: &RevocationRecord) -> RevocationResult<()>;

    /// Read the record at `key`. An absent record is `Ok(None)`, never an
    /// error; callers branch on presence.
    async fn get(&self, key: &str) -> RevocationResult<Option<RevocationRecord>>;

    /// Enumerate the logical keys in this store's namespace, with the
    /// namespace prefix already stripped. Each call re-scans from scratch;
    /// ordering is unspecified.
    async fn scan_keys(&self) -> RevocationResult<Vec<String>>;

    /// Delete the record at `key`. Idempotent: deleting a missing key
    /// succeeds silently.
    async fn delete(&self, key: &str) -> RevocationResult<()>;

    /// Destructive wipe of the entire backing store, all namespaces
    /// included. Intended for test/reset use only.
    async fn flush_all(&self) -> RevocationResult<()>;

    /// Visit every logical key in the namespace. Convenience over
    /// [`scan_keys`](Self::scan_keys).
    async fn for_each_key<F>(&self, visitor: F) -> RevocationResult<()>
    where
        F: FnMut(&str) + Send,
    {
        let mut visitor = visitor;
        for key in self.scan_keys().await? {
            visitor(&key);
        }
        Ok(())
    }
}
