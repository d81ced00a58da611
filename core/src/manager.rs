//! Facade wiring one store handle through the cache, validator, and
//! rotation coordinator.

use crate::cache::RevocationCache;
use crate::codec::{DecodingKey, EncodingKey, VerifyOptions};
use crate::domain::{RevocationRecord, TokenPair};
use crate::errors::RevocationResult;
use crate::rotation::{RotationConfig, RotationCoordinator};
use crate::store::RevocationStore;
use crate::validator::{ValidationOutcome, Validator};

/// The surface this crate exposes to an embedding application.
///
/// One explicit store handle is passed at construction and shared by every
/// component; there is no process-wide client.
pub struct TokenManager<S: RevocationStore + Clone> {
    store: S,
    cache: RevocationCache<S>,
    validator: Validator<S>,
    rotation: RotationCoordinator<S>,
}

impl<S: RevocationStore + Clone> TokenManager<S> {
    pub fn new(store: S) -> Self {
        let cache = RevocationCache::new(store.clone());
        Self {
            validator: Validator::new(cache.clone()),
            rotation: RotationCoordinator::new(cache.clone()),
            cache,
            store,
        }
    }

    /// The revocation cache, for callers that schedule their own sweeps.
    pub fn cache(&self) -> &RevocationCache<S> {
        &self.cache
    }

    // Store passthroughs.

    pub async fn put(&self, key: &str, record: &RevocationRecord) -> RevocationResult<()> {
        self.store.put(key, record).await
    }

    pub async fn get(&self, key: &str) -> RevocationResult<Option<RevocationRecord>> {
        self.store.get(key).await
    }

    pub async fn scan_keys(&self) -> RevocationResult<Vec<String>> {
        self.store.scan_keys().await
    }

    pub async fn for_each_key<F>(&self, visitor: F) -> RevocationResult<()>
    where
        F: FnMut(&str) + Send,
    {
        self.store.for_each_key(visitor).await
    }

    /// Destroy the entire backing store, all namespaces included. Dangerous;
    /// test/reset use only.
    pub async fn wipe_store(&self) -> RevocationResult<()> {
        self.store.flush_all().await
    }

    // Token lifecycle.

    pub async fn validate(
        &self,
        token: &str,
        key: &DecodingKey,
        options: &VerifyOptions,
    ) -> RevocationResult<ValidationOutcome> {
        self.validator.validate(token, key, options).await
    }

    pub async fn validate_with_callback<F>(
        &self,
        token: &str,
        key: &DecodingKey,
        options: &VerifyOptions,
        callback: F,
    ) where
        F: FnOnce(RevocationResult<ValidationOutcome>) + Send,
    {
        self.validator
            .validate_with_callback(token, key, options, callback)
            .await
    }

    /// Mark a token revoked. Idempotent; an already-expired or
    /// already-revoked token is a successful no-op.
    pub async fn invalidate(&self, token: &str) -> RevocationResult<()> {
        self.cache.mark_revoked(token).await
    }

    pub async fn rotate(
        &self,
        access_token: &str,
        refresh_token: &str,
        signing_key: &EncodingKey,
        config: &RotationConfig,
    ) -> RevocationResult<TokenPair> {
        self.rotation
            .rotate(access_token, refresh_token, signing_key, config)
            .await
    }

    pub async fn sweep_expired(&self) -> RevocationResult<usize> {
        self.cache.sweep_expired().await
    }

    pub async fn wipe_all(&self) -> RevocationResult<usize> {
        self.cache.wipe_all().await
    }
}
