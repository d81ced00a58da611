//! Token codec: signing, verification, and unverified claim decoding.
//!
//! Thin wrapper over `jsonwebtoken`. Verification failures are mapped onto
//! the crate's [`TokenError`] taxonomy and propagated unchanged; nothing in
//! here touches the revocation store.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};
use serde_json::{Map, Value};

use crate::domain::{Claims, DecodedToken};
use crate::errors::TokenError;

pub use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};


/// Options applied when signing a token.
#[derive(Debug, Clone)]
pub struct SignOptions {
    pub algorithm: Algorithm,
    /// Lifetime stamped into the `exp` claim, relative to now.
    pub expires_in: Duration,
    /// Optional `nbf` offset relative to now.
    pub not_before: Option<Duration>,
}

impl SignOptions {
    pub fn new(algorithm: Algorithm, expires_in: Duration) -> Self {
        Self {
            algorithm,
            expires_in,
            not_before: None,
        }
    }
}

impl Default for SignOptions {
    fn default() -> Self {
        Self::new(Algorithm::HS256, Duration::minutes(15))
    }
}

/// Options applied when verifying a token.
#[derive(Debug, Clone)]
pub struct VerifyOptions {
    pub algorithms: Vec<Algorithm>,
    pub validate_nbf: bool,
    /// Clock skew tolerance in seconds for `exp`/`nbf` checks.
    pub leeway: u64,
}

impl Default for VerifyOptions {
    fn default() -> Self {
        Self {
            algorithms: vec![Algorithm::HS256],
            validate_nbf: true,
            leeway: 0,
        }
    }
}

/// Cheap syntactic precondition: the token must be non-empty and split into
/// exactly three dot-separated segments. Applied before any store access or
/// cryptographic work.
pub fn check_well_formed(token: &str) -> Result<(), TokenError> {
    if token.is_empty() || token.split('.').count() != 3 {
        return Err(TokenError::MalformedToken);
    }
    Ok(())
}

/// Sign a payload into a token, stamping `exp` and `iat` from the options.
///
/// Registered timestamp claims in the payload are ignored; the options are
/// the single source of truth for them.
pub fn sign(
    payload: &Map<String, Value>,
    key: &EncodingKey,
    options: &SignOptions,
) -> Result<String, TokenError> {
    let now = Utc::now();
    let mut extra = payload.clone();
    extra.remove("exp");
    extra.remove("iat");
    extra.remove("nbf");

    let claims = Claims {
        exp: (now + options.expires_in).timestamp(),
        iat: Some(now.timestamp()),
        nbf: options.not_before.map(|offset| (now + offset).timestamp()),
        extra,
    };

    encode(&Header::new(options.algorithm), &claims, key).map_err(|e| TokenError::SigningFailed {
        message: e.to_string(),
    })
}

/// Verify a token's signature and standard claims (`exp`, optionally `nbf`)
/// and return the decoded claims.
pub fn verify(
    token: &str,
    key: &DecodingKey,
    options: &VerifyOptions,
) -> Result<Claims, TokenError> {
    check_well_formed(token)?;

    let mut validation = Validation::new(
        options
            .algorithms
            .first()
            .copied()
            .unwrap_or(Algorithm::HS256),
    );
    validation.algorithms = options.algorithms.clone();
    validation.validate_nbf = options.validate_nbf;
    validation.leeway = options.leeway;

    let token_data = decode::<Claims>(token, key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
        jsonwebtoken::errors::ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::MalformedToken,
    })?;

    Ok(token_data.claims)
}

/// Decode a token's claims without verifying anything.
///
/// The revocation cache uses this to read `exp` off tokens it is asked to
/// invalidate; trust decisions never flow through here.
pub fn decode_unverified(token: &str) -> Result<Claims, TokenError> {
    check_well_formed(token)?;

    // Well-formedness guarantees three segments.
    let payload_segment = token.split('.').nth(1).ok_or(TokenError::MalformedToken)?;
    let payload = URL_SAFE_NO_PAD
        .decode(payload_segment)
        .map_err(|_| TokenError::MalformedToken)?;
    let value: Value = serde_json::from_slice(&payload).map_err(|_| TokenError::MalformedToken)?;

    if value.get("exp").and_then(Value::as_i64).is_none() {
        return Err(TokenError::MissingClaim {
            claim: "exp".to_string(),
        });
    }

    serde_json::from_value(value).map_err(|_| TokenError::MalformedToken)
}

/// Decode a token into header, claims, and raw signature segment, without
/// verification.
pub fn decode_complete(token: &str) -> Result<DecodedToken, TokenError> {
    let claims = decode_unverified(token)?;
    let header = decode_header(token).map_err(|_| TokenError::MalformedToken)?;
    let signature = token
        .split('.')
        .nth(2)
        .ok_or(TokenError::MalformedToken)?
        .to_string();

    Ok(DecodedToken {
        header,
        claims,
        signature,
    })
}
