use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::app::{NewsError, Result};
use crate::config::CacheConfig;
use crate::store::KeyValueStore;

pub const HOME_NEWS_CACHE_KEY: &str = "homeNewsCache";

/// What is persisted under a cache key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    /// Milliseconds since the Unix epoch at write time.
    pub timestamp: i64,
}

/// Best-effort cache with lazy TTL expiry.
///
/// Writes never fail from the caller's point of view and reads treat every
/// problem as a miss.
#[derive(Clone)]
pub struct CacheStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
    ttl: Duration,
    max_items: usize,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore + Send + Sync>, config: &CacheConfig) -> Self {
        Self {
            store,
            ttl: config.ttl(),
            max_items: config.max_items,
        }
    }

    /// Persist `data` stamped with the current time. Sequences are truncated
    /// to their first `max_items` elements.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, data: &T) {
        if let Err(e) = self.try_set(key, data) {
            warn!(key, error = %e, "failed to write cache entry");
        }
    }

    fn try_set<T: Serialize + ?Sized>(&self, key: &str, data: &T) -> Result<()> {
        let mut value = serde_json::to_value(data)?;
        if let Value::Array(items) = &mut value {
            items.truncate(self.max_items);
        }

        let entry = CacheEntry {
            data: value,
            timestamp: Utc::now().timestamp_millis(),
        };
        self.store.set_item(key, &serde_json::to_string(&entry)?)
    }

    /// Read a fresh entry. Expired entries are deleted and reported as a
    /// miss, as are unreadable ones.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.try_get(key) {
            Ok(data) => data,
            Err(e) => {
                warn!(key, error = %e, "failed to read cache entry");
                None
            }
        }
    }

    /// Like [`get`](Self::get), but a miss is an error.
    pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.get(key)
            .ok_or_else(|| NewsError::CacheMiss(key.to_string()))
    }

    fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.store.get_item(key)? else {
            return Ok(None);
        };

        let entry: CacheEntry<T> = serde_json::from_str(&raw)?;
        let age_ms = Utc::now().timestamp_millis() - entry.timestamp;
        if age_ms > self.ttl.as_millis() as i64 {
            debug!(key, age_ms, "cache entry expired");
            self.store.remove_item(key)?;
            return Ok(None);
        }

        Ok(Some(entry.data))
    }
}
