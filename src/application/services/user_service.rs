//! User listing service with a cache-aside read path.

use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::User;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Cache key for the full user listing.
const ALL_USERS_KEY: &str = "all_users";

/// Service producing the user listing, cached so repeated reads avoid the
/// backing store.
///
/// Follows the cache-aside pattern: check the cache, on miss fetch from the
/// repository and write the result back before returning it. There is no
/// single-flight guard, so concurrent misses may each fetch and overwrite;
/// last write wins.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    cache: Arc<CacheService>,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a new user service.
    pub fn new(repository: Arc<R>, cache: Arc<CacheService>) -> Self {
        Self { repository, cache }
    }

    /// Returns all users, from cache when a fresh entry exists.
    ///
    /// Cache failures on either side of the read are logged and degrade to
    /// a repository fetch; only repository errors propagate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the repository fetch fails.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        match self.cache.get::<Vec<User>>(ALL_USERS_KEY).await {
            Ok(Some(users)) => return Ok(users),
            Ok(None) => {}
            Err(e) => warn!("Cache read failed for {}: {}", ALL_USERS_KEY, e),
        }

        let users = self.repository.find_all().await?;

        if let Err(e) = self.cache.set(ALL_USERS_KEY, users.clone(), None).await {
            warn!("Failed to cache {}: {}", ALL_USERS_KEY, e);
        }

        Ok(users)
    }
}
