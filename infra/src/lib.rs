//! # jwtr infrastructure
//!
//! Redis-backed implementation of the
//! [`RevocationStore`](jwtr_core::store::RevocationStore) contract, plus its
//! configuration. Connection lifecycle, bounded retry of transient failures,
//! and the wire protocol live here; the core never retries on its own.

pub mod config;
pub mod store;

pub use config::CacheConfig;
pub use store::RedisStore;
