//! Redis cache for LLM-generated recommendations, keyed by user uid.
//!
//! The cache is advisory: connection or decode failures are logged and treated
//! as a miss, never surfaced to the caller.

use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct RecommendationCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl RecommendationCache {
    pub fn new(redis_url: &str, ttl_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            client: redis::Client::open(redis_url)?,
            ttl_secs,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, uid: &str) -> Option<T> {
        let key = cache_key(uid);
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(c) => c,
            Err(e) => {
                warn!("Redis unavailable, skipping cache read: {e}");
                return None;
            }
        };

        let raw: Option<String> = match conn.get(&key).await {
            Ok(v) => v,
            Err(e) => {
                warn!("Redis GET {key} failed: {e}");
                return None;
            }
        };

        let value = raw.and_then(|s| serde_json::from_str(&s).ok());
        debug!(hit = value.is_some(), "recommendation cache lookup for {uid}");
        value
    }

    pub async fn put<T: Serialize>(&self, uid: &str, value: &T) {
        let key = cache_key(uid);
        let payload = match serde_json::to_string(value) {
            Ok(p) => p,
            Err(e) => {
                warn!("Could not serialize cache entry {key}: {e}");
                return;
            }
        };

        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn
                    .set_ex::<_, _, ()>(&key, payload, self.ttl_secs)
                    .await
                {
                    warn!("Redis SETEX {key} failed: {e}");
                }
            }
            Err(e) => warn!("Redis unavailable, skipping cache write: {e}"),
        }
    }

    /// Drops the cached entry; called whenever the user's resume changes.
    pub async fn invalidate(&self, uid: &str) {
        let key = cache_key(uid);
        match self.client.get_multiplexed_async_connection().await {
            Ok(mut conn) => {
                if let Err(e) = conn.del::<_, ()>(&key).await {
                    warn!("Redis DEL {key} failed: {e}");
                }
            }
            Err(e) => warn!("Redis unavailable, skipping cache invalidation: {e}"),
        }
    }
}

fn cache_key(uid: &str) -> String {
    format!("recommendations:{uid}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_namespaced() {
        assert_eq!(cache_key("u-1"), "recommendations:u-1");
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_a_miss() {
        // Port 1 is never a Redis server; the read must degrade to None.
        let cache = RecommendationCache::new("redis://127.0.0.1:1/", 60).unwrap();
        let value: Option<String> = cache.get("u-1").await;
        assert!(value.is_none());
        cache.put("u-1", &"x").await;
        cache.invalidate("u-1").await;
    }
}
