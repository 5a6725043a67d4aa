//! Application layer services implementing business logic.
//!
//! Services consume repository traits and the cache, providing a clean API
//! for HTTP handlers.

pub mod services;
