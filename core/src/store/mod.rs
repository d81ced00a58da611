//! Revocation store abstraction and the in-memory implementation.

mod memory;
mod r#trait;


pub use memory::MemoryStore;
pub use r#trait::{validate_key, RevocationStore};
