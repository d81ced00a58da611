//! Domain entities: token claims and revocation records.

pub mod claims;
pub mod revocation;

pub use claims::{Claims, DecodedToken, TokenPair};
pub use revocation::{RevocationRecord, RevocationStatus};
