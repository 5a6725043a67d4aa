use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::UserService;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::persistence::PgUserRepository;

/// Shared application state injected into all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub user_service: Arc<UserService<PgUserRepository>>,
    pub cache: Arc<CacheService>,
}

impl AppState {
    pub fn new(
        db: Arc<PgPool>,
        user_service: Arc<UserService<PgUserRepository>>,
        cache: Arc<CacheService>,
    ) -> Self {
        Self {
            db,
            user_service,
            cache,
        }
    }
}
