//! Token claims and token pair entities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims carried by a signed token.
///
/// Only the expiry claim is required by this crate: the revocation cache
/// copies it into every revocation record so that reclamation can discard
/// the record once the token itself would fail verification anyway. All
/// other claims are application-defined and carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration timestamp, epoch seconds.
    pub exp: i64,

    /// Issued-at timestamp, epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not-before timestamp, epoch seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Application-defined claims, kept as free-form JSON.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Claims {
    /// Expiry converted to epoch milliseconds, the unit revocation records
    /// are keyed on.
    ///
    /// Saturating: unverified tokens can carry an arbitrary `exp`, and a
    /// wrapped negative expiry would read as already expired.
    pub fn expires_at_ms(&self) -> i64 {
        self.exp.saturating_mul(1000)
    }

    /// Whether the expiry claim is in the past relative to wall-clock time.
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.exp
    }

    /// Look up an application-defined claim by name.
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.extra.get(claim)
    }
}

/// A fully decoded but unverified token: header, claims, and the raw
/// signature segment.
#[derive(Debug, Clone)]
pub struct DecodedToken {
    pub header: jsonwebtoken::Header,
    pub claims: Claims,
    pub signature: String,
}

/// An access/refresh token pair returned by rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
