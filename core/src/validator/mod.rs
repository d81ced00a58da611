//! Token validation: revocation lookup followed by cryptographic
//! verification.

use crate::cache::RevocationCache;
use crate::codec::{self, DecodingKey, VerifyOptions};
use crate::domain::Claims;
use crate::errors::RevocationResult;
use crate::store::RevocationStore;


/// Outcome of a validation call.
///
/// Revocation is an expected, common result and is therefore a value, not an
/// error; callers branch on the variant. Verification failures (bad
/// signature, expired, not yet valid) stay errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// The token verified; here are its claims.
    Valid(Claims),
    /// A revocation record exists for this token.
    Revoked,
}

impl ValidationOutcome {
    pub fn is_revoked(&self) -> bool {
        matches!(self, ValidationOutcome::Revoked)
    }

    pub fn claims(&self) -> Option<&Claims> {
        match self {
            ValidationOutcome::Valid(claims) => Some(claims),
            ValidationOutcome::Revoked => None,
        }
    }

    pub fn into_claims(self) -> Option<Claims> {
        match self {
            ValidationOutcome::Valid(claims) => Some(claims),
            ValidationOutcome::Revoked => None,
        }
    }
}

/// Decides trust for a presented token: well-formedness, then revocation
/// state, then signature and standard claims.
#[derive(Clone)]
pub struct Validator<S> {
    cache: RevocationCache<S>,
}

impl<S: RevocationStore> Validator<S> {
    pub fn new(cache: RevocationCache<S>) -> Self {
        Self { cache }
    }

    /// Validate a token.
    ///
    /// Sequence: syntactic shape check, revocation lookup, then delegation
    /// to the codec for signature/`exp`/`nbf` verification. Codec errors are
    /// propagated unchanged. The revocation lookup wins over signature
    /// validity: a revoked token reports [`ValidationOutcome::Revoked`] even
    /// if no key would verify it.
    pub async fn validate(
        &self,
        token: &str,
        key: &DecodingKey,
        options: &VerifyOptions,
    ) -> RevocationResult<ValidationOutcome> {
        codec::check_well_formed(token)?;

        if self.cache.is_revoked(token).await? {
            return Ok(ValidationOutcome::Revoked);
        }

        let claims = codec::verify(token, key, options)?;
        Ok(ValidationOutcome::Valid(claims))
    }

    /// Completion-style twin of [`validate`](Self::validate): the result is
    /// delivered through the callback instead of the return value.
    pub async fn validate_with_callback<F>(
        &self,
        token: &str,
        key: &DecodingKey,
        options: &VerifyOptions,
        callback: F,
    ) where
        F: FnOnce(RevocationResult<ValidationOutcome>) + Send,
    {
        callback(self.validate(token, key, options).await);
    }
}
