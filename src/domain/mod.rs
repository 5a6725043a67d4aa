//! Domain layer containing business entities and repository contracts.
//!
//! No dependencies on infrastructure or presentation layers; repository
//! traits defined here are implemented by
//! [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
