//! Middleware for API requests.

pub mod tracing;
