//! Infrastructure layer for external integrations.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (in-process and Redis backends)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
