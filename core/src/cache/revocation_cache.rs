//! Token-level revocation logic mapped onto the store.

use chrono::Utc;
use tracing::debug;

use crate::codec;
use crate::domain::{RevocationRecord, RevocationStatus};
use crate::errors::RevocationResult;
use crate::store::RevocationStore;

/// Translates token-level revocation semantics onto a [`RevocationStore`].
///
/// The store handle is held explicitly at construction; there is no ambient
/// client. Cloning yields another handle onto the same store.
#[derive(Clone)]
pub struct RevocationCache<S> {
    store: S,
}

impl<S: RevocationStore> RevocationCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mark a token revoked.
    ///
    /// Decodes the token's unverified claims to obtain `exp`. A token whose
    /// expiry is already in the past is a successful no-op: any verifier
    /// already rejects it, so a record would be wasted store space. Revoking
    /// an already-revoked token is also a no-op; the existing record is left
    /// unchanged.
    pub async fn mark_revoked(&self, token: &str) -> RevocationResult<()> {
        codec::check_well_formed(token)?;
        let claims = codec::decode_unverified(token)?;

        let expires_at_ms = claims.expires_at_ms();
        let now_ms = Utc::now().timestamp_millis();
        if expires_at_ms < now_ms {
            debug!("token already expired, skipping revocation record");
            return Ok(());
        }

        if let Some(existing) = self.store.get(token).await? {
            if existing.status == RevocationStatus::Invalidated {
                debug!("token already revoked");
                return Ok(());
            }
        }

        self.store
            .put(token, &RevocationRecord::invalidated(expires_at_ms))
            .await
    }

    /// Whether a revocation record exists for this token.
    ///
    /// Pure lookup: presence with status invalidated means revoked, absence
    /// means not revoked. Signature validity is never inspected here.
    pub async fn is_revoked(&self, token: &str) -> RevocationResult<bool> {
        match self.store.get(token).await? {
            Some(record) => Ok(record.status == RevocationStatus::Invalidated),
            None => Ok(false),
        }
    }

    /// Delete every record whose expiry is strictly in the past and return
    /// the count deleted.
    ///
    /// This is the sole reclamation mechanism; the store carries no native
    /// TTL. Concurrent sweeps are safe because delete is idempotent, and a
    /// record re-created by a racing `mark_revoked` carries the real token
    /// expiry, so it is not prematurely reclaimed.
    pub async fn sweep_expired(&self) -> RevocationResult<usize> {
        let now_ms = Utc::now().timestamp_millis();
        let mut deleted = 0;

        for key in self.store.scan_keys().await? {
            if let Some(record) = self.store.get(&key).await? {
                if record.is_expired(now_ms) {
                    self.store.delete(&key).await?;
                    deleted += 1;
                }
            }
        }

        debug!(deleted, "sweep finished");
        Ok(deleted)
    }

    /// Unconditionally delete every record in this namespace, regardless of
    /// expiry, and return the count deleted. Distinct from
    /// [`RevocationStore::flush_all`], which destroys the whole store.
    pub async fn wipe_all(&self) -> RevocationResult<usize> {
        let keys = self.store.scan_keys().await?;
        let mut deleted = 0;

        for key in keys {
            self.store.delete(&key).await?;
            deleted += 1;
        }

        debug!(deleted, "namespace wiped");
        Ok(deleted)
    }
}
