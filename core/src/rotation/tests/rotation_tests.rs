//! Unit tests for the rotation coordinator.

use chrono::Duration;
use serde_json::{json, Map};

use crate::cache::RevocationCache;
use crate::codec::{self, Algorithm, DecodingKey, EncodingKey, SignOptions, VerifyOptions};
use crate::errors::{RevocationError, TokenError};
use crate::rotation::{RotationConfig, RotationCoordinator};
use crate::store::{MemoryStore, RevocationStore};

const SECRET: &[u8] = b"test_secret";

fn signed_token(user_id: i64, expires_in: Duration) -> String {
    let mut payload = Map::new();
    payload.insert("userId".to_string(), json!(user_id));
    codec::sign(
        &payload,
        &EncodingKey::from_secret(SECRET),
        &SignOptions::new(Algorithm::HS256, expires_in),
    )
    .unwrap()
}

fn setup() -> (RotationCoordinator<MemoryStore>, RevocationCache<MemoryStore>) {
    let cache = RevocationCache::new(MemoryStore::with_prefix("token:"));
    (RotationCoordinator::new(cache.clone()), cache)
}

#[tokio::test]
async fn rotation_revokes_the_old_pair_and_mints_a_distinct_one() {
    let (coordinator, cache) = setup();
    let access = signed_token(1, Duration::minutes(15));
    let refresh = signed_token(1, Duration::hours(2));

    let pair = coordinator
        .rotate(
            &access,
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap();

    assert_ne!(pair.access_token, access);
    assert_ne!(pair.refresh_token, refresh);
    assert_ne!(pair.access_token, pair.refresh_token);

    assert!(cache.is_revoked(&access).await.unwrap());
    assert!(cache.is_revoked(&refresh).await.unwrap());
    assert!(!cache.is_revoked(&pair.access_token).await.unwrap());
    assert!(!cache.is_revoked(&pair.refresh_token).await.unwrap());
}

#[tokio::test]
async fn configured_payloads_are_carried_into_the_new_pair() {
    let (coordinator, _) = setup();
    let access = signed_token(1, Duration::minutes(15));
    let refresh = signed_token(1, Duration::hours(2));

    let mut payload = Map::new();
    payload.insert("userId".to_string(), json!(1));
    let config = RotationConfig::default()
        .with_access_payload(payload.clone())
        .with_refresh_payload(payload);

    let pair = coordinator
        .rotate(&access, &refresh, &EncodingKey::from_secret(SECRET), &config)
        .await
        .unwrap();

    let access_claims = codec::verify(
        &pair.access_token,
        &DecodingKey::from_secret(SECRET),
        &VerifyOptions::default(),
    )
    .unwrap();
    assert_eq!(access_claims.get("userId"), Some(&json!(1)));

    let refresh_claims = codec::verify(
        &pair.refresh_token,
        &DecodingKey::from_secret(SECRET),
        &VerifyOptions::default(),
    )
    .unwrap();
    assert_eq!(refresh_claims.get("userId"), Some(&json!(1)));
}

#[tokio::test]
async fn default_lifetimes_are_fifteen_minutes_and_two_hours() {
    let (coordinator, _) = setup();
    let access = signed_token(1, Duration::minutes(15));
    let refresh = signed_token(1, Duration::hours(2));

    let pair = coordinator
        .rotate(
            &access,
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap();

    let now = chrono::Utc::now().timestamp();
    let access_claims = codec::decode_unverified(&pair.access_token).unwrap();
    let refresh_claims = codec::decode_unverified(&pair.refresh_token).unwrap();

    // Within a few seconds of the nominal lifetimes.
    assert!((access_claims.exp - now - 15 * 60).abs() <= 5);
    assert!((refresh_claims.exp - now - 2 * 3600).abs() <= 5);
}

#[tokio::test]
async fn malformed_input_aborts_before_any_invalidation() {
    let (coordinator, cache) = setup();
    let refresh = signed_token(1, Duration::hours(2));

    let err = coordinator
        .rotate(
            "bogus",
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RevocationError::Token(TokenError::MalformedToken)
    ));
    // Nothing was written: the refresh token was never invalidated.
    assert!(!cache.is_revoked(&refresh).await.unwrap());
    assert!(cache.store().scan_keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn an_already_expired_pair_still_rotates() {
    let (coordinator, cache) = setup();
    let access = signed_token(1, Duration::seconds(-60));
    let refresh = signed_token(1, Duration::seconds(-60));

    let pair = coordinator
        .rotate(
            &access,
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap();

    // The expired pair needed no records; the new pair verifies.
    assert!(cache.store().scan_keys().await.unwrap().is_empty());
    assert!(codec::verify(
        &pair.access_token,
        &DecodingKey::from_secret(SECRET),
        &VerifyOptions::default(),
    )
    .is_ok());
}

#[tokio::test]
async fn rotating_an_already_revoked_pair_is_safe_to_retry() {
    let (coordinator, cache) = setup();
    let access = signed_token(1, Duration::minutes(15));
    let refresh = signed_token(1, Duration::hours(2));

    coordinator
        .rotate(
            &access,
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap();

    // Retry with the same old pair, e.g. after a signing failure upstream.
    let pair = coordinator
        .rotate(
            &access,
            &refresh,
            &EncodingKey::from_secret(SECRET),
            &RotationConfig::default(),
        )
        .await
        .unwrap();

    assert!(cache.is_revoked(&access).await.unwrap());
    assert!(!pair.access_token.is_empty());
}
