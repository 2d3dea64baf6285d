//! Short-lived cache of unfiltered merged results, keyed on route identity.
//!
//! Entries hold what the providers returned before any filtering or sorting,
//! so requests that differ only in passengers, filters or sort order share one
//! fetch.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use aerosearch_core::{SearchCriteria, UnifiedFlight};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use tracing::debug;

pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct CachedEntry {
    pub flights: Vec<UnifiedFlight>,
    pub stored_at: Instant,
}

impl CachedEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() < ttl
    }
}

/// Route identity hash: origin, destination, departure date and cabin class.
pub fn route_key(criteria: &SearchCriteria) -> String {
    let material = format!(
        "{}_{}_{}_{}",
        criteria.origin, criteria.destination, criteria.departure_date, criteria.cabin_class
    );
    hex::encode(Sha256::digest(material.as_bytes()))
}

pub struct ResultCache {
    entries: RwLock<HashMap<String, CachedEntry>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the entry if it is younger than the TTL. A stale entry is evicted.
    pub async fn get(&self, key: &str) -> Option<CachedEntry> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(self.ttl) => return Some(entry.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock: a concurrent put may have refreshed it.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.is_fresh(self.ttl) {
                return Some(entry.clone());
            }
            entries.remove(key);
            debug!("Evicted stale cache entry {}", key);
        }
        None
    }

    /// Stores the merged set, replacing whatever was there.
    pub async fn put(&self, key: String, flights: Vec<UnifiedFlight>) {
        let entry = CachedEntry {
            flights,
            stored_at: Instant::now(),
        };
        self.entries.write().await.insert(key, entry);
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();
        entries.retain(|_, entry| entry.is_fresh(self.ttl));
        initial_count - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{criteria as route, flight};
    use aerosearch_core::FilterOptions;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_round_trip_within_ttl() {
        let cache = ResultCache::default();
        let flights = vec![flight("A", 1_000_000.0), flight("B", 750_000.0)];

        cache.put("k".to_string(), flights.clone()).await;
        let entry = cache.get("k").await.expect("entry should be fresh");
        assert_eq!(entry.flights, flights);
    }

    #[tokio::test]
    async fn test_expired_entry_is_miss_and_evicted() {
        let cache = ResultCache::new(Duration::from_millis(20));
        cache.put("k".to_string(), vec![flight("A", 1.0)]).await;
        assert_eq!(cache.len().await, 1);

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(cache.get("k").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let cache = ResultCache::default();
        cache.put("k".to_string(), vec![flight("A", 1.0)]).await;
        cache.put("k".to_string(), Vec::new()).await;

        let entry = cache.get("k").await.expect("empty sets are cached too");
        assert!(entry.flights.is_empty());
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let cache = ResultCache::new(Duration::from_millis(20));
        cache.put("old".to_string(), Vec::new()).await;
        tokio::time::sleep(Duration::from_millis(40)).await;
        cache.put("new".to_string(), Vec::new()).await;

        assert_eq!(cache.purge_expired().await, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache.get("new").await.is_some());
    }

    #[test]
    fn test_route_key_ignores_display_fields() {
        let base = route("best_value");
        let mut other = route("best_value");
        other.passengers = 4;
        other.sort_by = "price_desc".to_string();
        other.filters = FilterOptions {
            max_stops: Some(0),
            airlines: vec!["Lion Air".to_string()],
            ..Default::default()
        };
        assert_eq!(route_key(&base), route_key(&other));
        assert_eq!(route_key(&base).len(), 64);

        let mut business = route("best_value");
        business.cabin_class = "business".to_string();
        assert_ne!(route_key(&base), route_key(&business));

        let mut later = route("best_value");
        later.departure_date = "2025-03-02".to_string();
        assert_ne!(route_key(&base), route_key(&later));
    }

    #[tokio::test]
    async fn test_concurrent_access() {
        let cache = Arc::new(ResultCache::default());
        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = cache.clone();
            handles.push(tokio::spawn(async move {
                let key = format!("route-{}", i % 4);
                cache.put(key.clone(), vec![flight("A", i as f64)]).await;
                cache.get(&key).await.is_some()
            }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert_eq!(cache.len().await, 4);
    }
}
