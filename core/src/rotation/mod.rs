//! Rotation of access/refresh token pairs.

use chrono::Duration;
use serde_json::{Map, Value};
use tracing::debug;

use crate::cache::RevocationCache;
use crate::codec::{self, Algorithm, EncodingKey, SignOptions};
use crate::domain::TokenPair;
use crate::errors::RevocationResult;
use crate::store::RevocationStore;

#[cfg(test)]
mod tests;

/// Payloads and signing options for the replacement pair.
#[derive(Debug, Clone)]
pub struct RotationConfig {
    pub access_payload: Map<String, Value>,
    pub refresh_payload: Map<String, Value>,
    pub access_options: SignOptions,
    pub refresh_options: SignOptions,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            access_payload: Map::new(),
            refresh_payload: Map::new(),
            access_options: SignOptions::new(Algorithm::HS256, Duration::minutes(15)),
            refresh_options: SignOptions::new(Algorithm::HS256, Duration::hours(2)),
        }
    }
}

impl RotationConfig {
    pub fn with_access_payload(mut self, payload: Map<String, Value>) -> Self {
        self.access_payload = payload;
        self
    }

    pub fn with_refresh_payload(mut self, payload: Map<String, Value>) -> Self {
        self.refresh_payload = payload;
        self
    }
}

/// Retires an access/refresh pair and mints its replacement.
///
/// Two concurrent rotations of the same pair are not mutually safe (both may
/// invalidate and both may mint); callers keep at most one rotation per pair
/// in flight, e.g. behind a single-flight guard keyed by token.
#[derive(Clone)]
pub struct RotationCoordinator<S> {
    cache: RevocationCache<S>,
}

impl<S: RevocationStore> RotationCoordinator<S> {
    pub fn new(cache: RevocationCache<S>) -> Self {
        Self { cache }
    }

    /// Invalidate the old pair, then sign a fresh pair.
    ///
    /// Both invalidations complete before either new token is signed, so a
    /// concurrent validator can never see the old pair as valid alongside
    /// freshly minted replacements. Each invalidation tolerates an already
    /// expired or already revoked token as a no-op. If either invalidation
    /// fails, the rotation aborts before any signing; if signing fails after
    /// the invalidations, the error is surfaced with the old pair revoked
    /// and no replacement issued. Retrying such a rotation is safe because
    /// re-invalidation is a no-op.
    pub async fn rotate(
        &self,
        access_token: &str,
        refresh_token: &str,
        signing_key: &EncodingKey,
        config: &RotationConfig,
    ) -> RevocationResult<TokenPair> {
        codec::check_well_formed(access_token)?;
        codec::check_well_formed(refresh_token)?;

        self.cache.mark_revoked(access_token).await?;
        self.cache.mark_revoked(refresh_token).await?;
        debug!("old token pair invalidated");

        let access = codec::sign(&config.access_payload, signing_key, &config.access_options)?;
        let refresh = codec::sign(&config.refresh_payload, signing_key, &config.refresh_options)?;

        Ok(TokenPair::new(access, refresh))
    }
}
