//! In-process cache backend with per-entry expiration.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::warn;

struct Entry {
    value: Arc<dyn Any + Send + Sync>,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// In-process associative store bounded by process lifetime.
///
/// Values are kept exactly as supplied, type-erased behind `Any`; no
/// serialization happens on this path. Expiration is enforced by the store
/// itself from the moment of write, with expired entries dropped lazily
/// when a lookup observes them.
///
/// Internally synchronized with an `RwLock`, so concurrent get/set from any
/// number of tasks is fine. Operations never block on I/O.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `key`, overwriting any existing entry and
    /// resetting its expiry to now + `ttl`.
    pub fn set<T: Send + Sync + 'static>(&self, key: &str, value: T, ttl: Duration) {
        let entry = Entry {
            value: Arc::new(value),
            expires_at: Instant::now() + ttl,
        };

        self.entries
            .write()
            .expect("cache lock poisoned")
            .insert(key.to_string(), entry);
    }

    /// Returns a clone of the value stored under `key`, or `None` when the
    /// entry is missing, expired, or of a different type than requested.
    ///
    /// A type mismatch is logged at WARN and treated as a miss, keeping the
    /// lookup contract uniform with the remote backend.
    pub fn get<T: Clone + Send + Sync + 'static>(&self, key: &str) -> Option<T> {
        let now = Instant::now();

        {
            let entries = self.entries.read().expect("cache lock poisoned");
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => {
                    return match Arc::clone(&entry.value).downcast::<T>() {
                        Ok(value) => Some((*value).clone()),
                        Err(_) => {
                            warn!(
                                "Cache entry for {} holds a different type than requested",
                                key
                            );
                            None
                        }
                    };
                }
                Some(_) => {} // expired, remove below
                None => return None,
            }
        }

        let mut entries = self.entries.write().expect("cache lock poisoned");
        let still_expired = entries.get(key).is_some_and(|e| e.is_expired(now));
        if still_expired {
            entries.remove(key);
        }

        None
    }

    /// Number of entries currently held, including not-yet-collected
    /// expired ones.
    pub fn len(&self) -> usize {
        self.entries.read().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
