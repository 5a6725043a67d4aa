//! Redis-backed cache backend.

use super::service::{CacheError, CacheResult};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{error, info, warn};

/// Out-of-process keyed byte store shared across service instances.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Operations
/// after a successful connect are fail-open: transport errors are logged
/// and surface as a miss (`get_bytes`) or a no-op (`set_bytes`), never as
/// an error to the caller. Timeouts are whatever the redis transport
/// provides; none are layered on here.
pub struct RedisCache {
    client: ConnectionManager,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    /// Stores an encoded payload under `key` with an absolute expiry of
    /// now + `ttl` (rounded up to at least one second, the resolution
    /// Redis expiries use).
    pub async fn set_bytes(&self, key: &str, bytes: Vec<u8>, ttl: Duration) {
        let mut conn = self.client.clone();
        let ttl_seconds = ttl.as_secs().max(1);

        if let Err(e) = conn.set_ex::<_, _, ()>(key, bytes, ttl_seconds).await {
            warn!("Redis SET error for {}: {}", key, e);
        }
    }

    /// Reads the payload stored under `key`.
    ///
    /// Returns `None` when no entry exists or the read fails; decoding is
    /// the dispatcher's concern.
    pub async fn get_bytes(&self, key: &str) -> Option<Vec<u8>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<Vec<u8>>>(key).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("Redis GET error for {}: {}", key, e);
                None
            }
        }
    }

    /// Checks connectivity via PING.
    pub async fn ping(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
