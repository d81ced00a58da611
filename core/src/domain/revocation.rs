//! Revocation record entity and its hash-field wire shape.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RevocationError;

/// Terminal marking carried by a revocation record.
///
/// Absence of a record means "not revoked"; there is no affirmative
/// "valid" marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevocationStatus {
    Invalidated,
}

impl RevocationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevocationStatus::Invalidated => "invalidated",
        }
    }
}

impl FromStr for RevocationStatus {
    type Err = RevocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "invalidated" => Ok(RevocationStatus::Invalidated),
            other => Err(RevocationError::store(format!(
                "unknown revocation status: {other}"
            ))),
        }
    }
}

/// A stored marker indicating a specific token was explicitly invalidated
/// before its natural expiry.
///
/// `expires_at_ms` is copied from the token's own `exp` claim (converted to
/// milliseconds) at the moment of invalidation and never mutated afterwards;
/// the record never needs to outlive the token it marks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationRecord {
    pub status: RevocationStatus,
    pub expires_at_ms: i64,
}

impl RevocationRecord {
    /// Hash field holding the status marking.
    pub const STATUS_FIELD: &'static str = "status";
    /// Hash field holding the expiry in epoch milliseconds.
    pub const EXPIRES_FIELD: &'static str = "exp";

    /// Create an invalidation record for a token expiring at the given
    /// epoch-millisecond instant.
    pub fn invalidated(expires_at_ms: i64) -> Self {
        Self {
            status: RevocationStatus::Invalidated,
            expires_at_ms,
        }
    }

    /// Whether the underlying token has already naturally expired.
    pub fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms < now_ms
    }

    /// Flatten into the field/value pairs stored as one hash record.
    pub fn to_fields(&self) -> [(&'static str, String); 2] {
        [
            (Self::STATUS_FIELD, self.status.as_str().to_string()),
            (Self::EXPIRES_FIELD, self.expires_at_ms.to_string()),
        ]
    }

    /// Rebuild a record from stored hash fields.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, RevocationError> {
        let status = fields
            .get(Self::STATUS_FIELD)
            .ok_or_else(|| RevocationError::store("record is missing the status field"))?
            .parse::<RevocationStatus>()?;
        let expires_at_ms = fields
            .get(Self::EXPIRES_FIELD)
            .ok_or_else(|| RevocationError::store("record is missing the expiry field"))?
            .parse::<i64>()
            .map_err(|e| RevocationError::store(format!("invalid record expiry: {e}")))?;

        Ok(Self {
            status,
            expires_at_ms,
        })
    }
}
