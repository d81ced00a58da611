//! # jwtr core
//!
//! Revocation-aware JWT lifecycle management: issue, validate, revoke, and
//! rotate signed access/refresh token pairs while tracking revocation state
//! in an external key-value store.
//!
//! Revocation records are keyed by the raw token string under a configured
//! namespace prefix, carry the token's own expiry, and are reclaimed by
//! sweeps once the token would fail verification anyway. The store is the
//! only shared mutable state; a single logical store is the source of truth.

pub mod cache;
pub mod codec;
pub mod domain;
pub mod errors;
pub mod manager;
pub mod rotation;
pub mod store;
pub mod validator;

// Re-export commonly used types for convenience
pub use cache::{RevocationCache, SweepConfig, SweepService};
pub use domain::{Claims, DecodedToken, RevocationRecord, RevocationStatus, TokenPair};
pub use errors::{RevocationError, RevocationResult, TokenError};
pub use manager::TokenManager;
pub use rotation::{RotationConfig, RotationCoordinator};
pub use store::{MemoryStore, RevocationStore};
pub use validator::{ValidationOutcome, Validator};
