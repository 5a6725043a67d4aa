//! Generic cache service dispatching to the configured backend.

use super::memory_cache::MemoryCache;
use super::redis_cache::RedisCache;
use crate::config::Config;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during cache operations.
///
/// Only [`CacheError::InvalidKey`] and [`CacheError::Serialization`] reach
/// callers during normal operation; both signal a contract violation at the
/// call site. Data-quality problems (missing, expired, or corrupt entries)
/// resolve to `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The key was empty or whitespace-only.
    #[error("cache key must not be empty or whitespace")]
    InvalidKey,

    /// The value could not be encoded for the remote backend.
    #[error("failed to serialize cache value: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote backend could not be reached at construction time.
    #[error("cache connection error: {0}")]
    Connection(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Which storage strategy a configuration value selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Local,
    Remote,
}

impl BackendKind {
    /// Resolves the `CACHE_BACKEND` setting to a backend kind.
    ///
    /// The exact, case-sensitive string `"Redis"` selects the remote backend;
    /// anything else, including an empty string, selects the local one.
    pub fn from_setting(value: &str) -> Self {
        if value == "Redis" {
            Self::Remote
        } else {
            Self::Local
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

/// The active storage strategy, chosen once at construction.
pub enum CacheBackend {
    /// In-process store; values are kept as supplied, without encoding.
    Local(MemoryCache),
    /// Shared Redis store; values cross a JSON byte encoding.
    Remote(RedisCache),
}

/// Cache-aside entry point used by any caller needing a cached value.
///
/// Holds the backend selected at startup and the default expiration, and
/// routes every get/set through the right strategy. Stateless beyond that
/// immutable configuration, so it is safe for unbounded concurrent callers;
/// synchronization is delegated to the backends themselves.
///
/// # Miss semantics
///
/// `get` never distinguishes "never cached" from "expired" from "corrupt":
/// all of them come back as `Ok(None)` and the caller recomputes. Only a
/// bad key (and, on `set`, an unencodable value) is an error.
pub struct CacheService {
    backend: CacheBackend,
    default_expiration: Duration,
}

impl CacheService {
    /// Creates a service with an explicit backend and default expiration.
    pub fn new(backend: CacheBackend, default_expiration: Duration) -> Self {
        Self {
            backend,
            default_expiration,
        }
    }

    /// Builds the service from configuration, connecting to Redis when the
    /// remote backend is selected.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the remote backend is selected
    /// but unreachable. The backend choice is fixed at startup; there is no
    /// silent downgrade to the local store.
    pub async fn from_config(config: &Config) -> CacheResult<Self> {
        let backend = match BackendKind::from_setting(&config.cache_backend) {
            BackendKind::Remote => {
                CacheBackend::Remote(RedisCache::connect(&config.redis_url).await?)
            }
            BackendKind::Local => CacheBackend::Local(MemoryCache::new()),
        };

        Ok(Self::new(backend, config.cache_expiration()))
    }

    /// Returns which backend strategy is active.
    pub fn backend_kind(&self) -> BackendKind {
        match self.backend {
            CacheBackend::Local(_) => BackendKind::Local,
            CacheBackend::Remote(_) => BackendKind::Remote,
        }
    }

    /// Stores `value` under `key`.
    ///
    /// When `expiration` is `None` the configured default applies. The local
    /// backend keeps the value as supplied; the remote backend encodes it to
    /// JSON bytes first and attaches an absolute expiry of now + expiration.
    ///
    /// # Errors
    ///
    /// - [`CacheError::InvalidKey`] for an empty or whitespace key.
    /// - [`CacheError::Serialization`] if the value cannot be encoded for
    ///   the remote backend. Transport failures are logged and swallowed.
    pub async fn set<T>(&self, key: &str, value: T, expiration: Option<Duration>) -> CacheResult<()>
    where
        T: Serialize + Send + Sync + 'static,
    {
        validate_key(key)?;
        let ttl = expiration.unwrap_or(self.default_expiration);

        match &self.backend {
            CacheBackend::Local(store) => {
                store.set(key, value, ttl);
                debug!("Cache SET: {} (local, TTL: {:?})", key, ttl);
            }
            CacheBackend::Remote(store) => {
                let bytes = serde_json::to_vec(&value)?;
                store.set_bytes(key, bytes, ttl).await;
                debug!("Cache SET: {} (remote, TTL: {:?})", key, ttl);
            }
        }

        Ok(())
    }

    /// Retrieves the value stored under `key`, if present and unexpired.
    ///
    /// Missing, expired, empty, undecodable, or wrongly-typed entries all
    /// resolve to `Ok(None)`; decode and type mismatches are logged at WARN
    /// so they stay visible without disturbing callers.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvalidKey`] for an empty or whitespace key.
    pub async fn get<T>(&self, key: &str) -> CacheResult<Option<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        validate_key(key)?;

        let hit = match &self.backend {
            CacheBackend::Local(store) => store.get::<T>(key),
            CacheBackend::Remote(store) => match store.get_bytes(key).await {
                Some(bytes) => decode_entry(key, &bytes),
                None => None,
            },
        };

        if hit.is_some() {
            debug!("Cache HIT: {}", key);
            metrics::counter!("cache_hits_total", "backend" => self.backend_kind().as_str())
                .increment(1);
        } else {
            debug!("Cache MISS: {}", key);
            metrics::counter!("cache_misses_total", "backend" => self.backend_kind().as_str())
                .increment(1);
        }

        Ok(hit)
    }

    /// Checks whether the active backend is reachable.
    ///
    /// The local store is always healthy; the remote store is PINGed.
    pub async fn health_check(&self) -> bool {
        match &self.backend {
            CacheBackend::Local(_) => true,
            CacheBackend::Remote(store) => store.ping().await,
        }
    }
}

fn validate_key(key: &str) -> CacheResult<()> {
    if key.trim().is_empty() {
        return Err(CacheError::InvalidKey);
    }
    Ok(())
}

/// Decodes a remote payload, treating empty or corrupt bytes as a miss.
fn decode_entry<T: DeserializeOwned>(key: &str, bytes: &[u8]) -> Option<T> {
    if bytes.is_empty() {
        return None;
    }

    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding undecodable cache entry for {}: {}", key, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn local_service() -> CacheService {
        CacheService::new(
            CacheBackend::Local(MemoryCache::new()),
            Duration::from_secs(300),
        )
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        id: i64,
        label: String,
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = local_service();
        let stored = Payload {
            id: 7,
            label: "seven".into(),
        };

        cache.set("payload", stored.clone(), None).await.unwrap();
        let loaded: Option<Payload> = cache.get("payload").await.unwrap();

        assert_eq!(loaded, Some(stored));
    }

    #[tokio::test]
    async fn get_on_unset_key_is_absent() {
        let cache = local_service();
        let loaded: Option<String> = cache.get("nothing-here").await.unwrap();
        assert_eq!(loaded, None);
    }

    #[tokio::test]
    async fn empty_and_whitespace_keys_are_rejected() {
        let cache = local_service();

        for key in ["", " ", "\t", "  \n "] {
            assert!(matches!(
                cache.set(key, 1_i64, None).await,
                Err(CacheError::InvalidKey)
            ));
            assert!(matches!(
                cache.get::<i64>(key).await,
                Err(CacheError::InvalidKey)
            ));
        }
    }

    #[tokio::test]
    async fn per_call_expiration_overrides_default() {
        let cache = local_service();

        cache
            .set("short-lived", 42_i64, Some(Duration::from_millis(20)))
            .await
            .unwrap();
        assert_eq!(cache.get::<i64>("short-lived").await.unwrap(), Some(42));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get::<i64>("short-lived").await.unwrap(), None);
    }

    #[tokio::test]
    async fn wrong_requested_type_is_a_soft_miss() {
        let cache = local_service();

        cache.set("typed", 42_i64, None).await.unwrap();
        let as_string: Option<String> = cache.get("typed").await.unwrap();

        assert_eq!(as_string, None);
    }

    #[test]
    fn corrupt_remote_payload_decodes_to_absent() {
        let decoded: Option<Payload> = decode_entry("k", b"{not json");
        assert_eq!(decoded, None);

        let truncated: Option<Payload> = decode_entry("k", b"{\"id\":7");
        assert_eq!(truncated, None);
    }

    #[test]
    fn empty_remote_payload_is_absent() {
        let decoded: Option<Payload> = decode_entry("k", b"");
        assert_eq!(decoded, None);
    }

    #[test]
    fn remote_payload_round_trips_through_bytes() {
        let stored = Payload {
            id: 3,
            label: "three".into(),
        };
        let bytes = serde_json::to_vec(&stored).unwrap();

        let decoded: Option<Payload> = decode_entry("k", &bytes);
        assert_eq!(decoded, Some(stored));
    }

    #[test]
    fn backend_selection_requires_exact_redis_marker() {
        assert_eq!(BackendKind::from_setting("Redis"), BackendKind::Remote);

        for setting in ["", "redis", "REDIS", "InMemory", "Memcached"] {
            assert_eq!(BackendKind::from_setting(setting), BackendKind::Local);
        }
    }
}
