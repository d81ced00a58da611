//! Revocation cache: token-level revocation semantics over a
//! [`RevocationStore`](crate::store::RevocationStore), plus the background
//! sweep service that bounds storage growth.

mod revocation_cache;
mod sweep;


pub use revocation_cache::RevocationCache;
pub use sweep::{SweepConfig, SweepService};
