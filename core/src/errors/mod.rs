//! Error types for token and revocation-store operations.

use thiserror::Error;

/// Token-level errors produced while decoding, verifying, or signing.
///
/// Verification failures coming out of the signing library are mapped onto
/// these variants and propagated unchanged to the caller; they are never
/// retried or swallowed.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    MalformedToken,

    #[error("token expired")]
    TokenExpired,

    #[error("token not yet valid")]
    TokenNotYetValid,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("missing required claim: {claim}")]
    MissingClaim { claim: String },

    #[error("token signing failed: {message}")]
    SigningFailed { message: String },
}

/// Errors surfaced by the revocation cache and its backing store.
#[derive(Error, Debug)]
pub enum RevocationError {
    /// Malformed or missing caller input. Surfaced before any store or
    /// crypto work happens; never retried.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Store-access failure (connectivity, timeout, protocol). Propagated
    /// as-is; retry policy belongs to the store implementation.
    #[error("store error: {message}")]
    Store { message: String },

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl RevocationError {
    /// Shorthand for an [`RevocationError::InvalidArgument`] error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Shorthand for a [`RevocationError::Store`] error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }
}

pub type RevocationResult<T> = Result<T, RevocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_error_messages() {
        assert_eq!(TokenError::MalformedToken.to_string(), "token is malformed");
        assert_eq!(
            TokenError::MissingClaim {
                claim: "exp".to_string()
            }
            .to_string(),
            "missing required claim: exp"
        );
    }

    #[test]
    fn token_error_is_transparent_in_revocation_error() {
        let err: RevocationError = TokenError::TokenExpired.into();
        assert_eq!(err.to_string(), "token expired");
    }

    #[test]
    fn invalid_argument_shorthand() {
        let err = RevocationError::invalid_argument("key is empty");
        assert_eq!(err.to_string(), "invalid argument: key is empty");
    }
}
