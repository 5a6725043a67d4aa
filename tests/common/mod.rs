#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use user_directory::application::services::UserService;
use user_directory::infrastructure::cache::{CacheBackend, CacheService, MemoryCache};
use user_directory::infrastructure::persistence::PgUserRepository;
use user_directory::state::AppState;

/// Number of users inserted by the seed migration.
pub const SEEDED_USER_COUNT: usize = 1000;

pub async fn create_test_user(pool: &PgPool, name: &str, email: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(email)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_users(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    create_test_state_with_expiration(pool, Duration::from_secs(300))
}

pub fn create_test_state_with_expiration(pool: PgPool, expiration: Duration) -> AppState {
    let pool = Arc::new(pool);

    let cache = Arc::new(CacheService::new(
        CacheBackend::Local(MemoryCache::new()),
        expiration,
    ));

    let user_repo = Arc::new(PgUserRepository::new(Arc::clone(&pool)));
    let user_service = Arc::new(UserService::new(user_repo, Arc::clone(&cache)));

    AppState::new(pool, user_service, cache)
}
