//! Caching layer for the user listing read path.
//!
//! Provides a [`CacheService`] with a generic get/set API over two backend
//! strategies selected once at startup:
//! - [`MemoryCache`] - in-process store, values kept without encoding
//! - [`RedisCache`] - shared Redis store, values encoded to JSON bytes

mod memory_cache;
mod redis_cache;
mod service;

pub use memory_cache::MemoryCache;
pub use redis_cache::RedisCache;
pub use service::{BackendKind, CacheBackend, CacheError, CacheResult, CacheService};
