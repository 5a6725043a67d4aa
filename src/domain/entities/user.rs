//! User entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record from the backing store.
///
/// `name` and `email` are required and bounded by the schema (100 and 200
/// characters respectively). Serde impls exist because user lists cross the
/// remote cache's byte encoding as well as the HTTP response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: i64, name: String, email: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }
}
