//! Core business data structures.

pub mod user;

pub use user::User;
