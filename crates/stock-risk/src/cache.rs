//! Caller-owned cache of fetched price series
//!
//! There is no process-wide cache: whoever needs memoized price data creates
//! a [`PriceCache`] and hands it to the code that fetches. Clones share the
//! same store.

use cached::{Cached, TimedCache};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::period::Period;
use crate::series::PriceSeries;

/// Cache key for price history requests
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Upper-cased ticker symbol
    pub ticker: String,
    pub period: Period,
}

impl CacheKey {
    /// Create a new cache key
    pub fn new(ticker: &str, period: Period) -> Self {
        Self {
            ticker: ticker.to_uppercase(),
            period,
        }
    }
}

/// Thread-safe, time-bounded map from `(ticker, period)` to an immutable series
#[derive(Clone)]
pub struct PriceCache {
    cache: Arc<RwLock<TimedCache<CacheKey, Arc<PriceSeries>>>>,
}

impl PriceCache {
    /// Create a new cache with specified TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    /// Get a series from the cache
    pub async fn get(&self, key: &CacheKey) -> Option<Arc<PriceSeries>> {
        // TimedCache evicts expired entries on read, so this needs the write lock.
        let mut cache = self.cache.write().await;
        cache.cache_get(key).cloned()
    }

    /// Insert a series into the cache
    pub async fn insert(&self, key: CacheKey, series: Arc<PriceSeries>) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, series);
    }

    /// Get or fetch a series using the provided fetcher function
    ///
    /// If the series exists in cache, it's returned immediately.
    /// Otherwise, the fetcher is awaited and a successful result is cached.
    pub async fn get_or_fetch<F, Fut, E>(
        &self,
        key: CacheKey,
        fetcher: F,
    ) -> Result<Arc<PriceSeries>, E>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<PriceSeries, E>>,
    {
        if let Some(series) = self.get(&key).await {
            tracing::debug!(ticker = %key.ticker, period = %key.period, "Cache hit");
            return Ok(series);
        }

        tracing::debug!(ticker = %key.ticker, period = %key.period, "Cache miss");

        let series = Arc::new(fetcher().await?);
        self.insert(key, Arc::clone(&series)).await;

        Ok(series)
    }

    /// Invalidate a specific cache entry
    pub async fn invalidate(&self, key: &CacheKey) {
        let mut cache = self.cache.write().await;
        let _ = cache.cache_remove(key);
    }

    /// Clear all cached entries
    pub async fn clear(&self) {
        let mut cache = self.cache.write().await;
        cache.cache_clear();
    }

    /// Get the number of cached entries
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.cache_size()
    }

    /// Check if the cache is empty
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use crate::series::fixtures::series;

    #[test]
    fn test_cache_key_normalizes_ticker() {
        let key = CacheKey::new("aapl", Period::SixMonths);
        assert_eq!(key.ticker, "AAPL");
        assert_eq!(key, CacheKey::new("AAPL", Period::SixMonths));
        assert_ne!(key, CacheKey::new("AAPL", Period::OneYear));
    }

    #[tokio::test]
    async fn test_cache_insert_and_get() {
        let cache = PriceCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", Period::OneMonth);
        let value = Arc::new(series("AAPL", &[1.0, 2.0]));

        cache.insert(key.clone(), Arc::clone(&value)).await;

        let retrieved = cache.get(&key).await;
        assert_eq!(retrieved, Some(value));
    }

    #[tokio::test]
    async fn test_cache_get_or_fetch() {
        let cache = PriceCache::new(Duration::from_secs(60));
        let key = CacheKey::new("AAPL", Period::OneMonth);

        let mut call_count = 0;
        let result = cache
            .get_or_fetch(key.clone(), || {
                call_count += 1;
                async { Ok::<_, RiskError>(series("AAPL", &[1.0, 2.0])) }
            })
            .await
            .unwrap();
        assert_eq!(result.closes(), vec![1.0, 2.0]);
        assert_eq!(call_count, 1);

        // Second call should use cache
        let again = cache
            .get_or_fetch(key, || {
                call_count += 1;
                async { Ok::<_, RiskError>(series("AAPL", &[9.0])) }
            })
            .await
            .unwrap();
        assert!(Arc::ptr_eq(&result, &again));
        assert_eq!(call_count, 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let cache = PriceCache::new(Duration::from_secs(60));
        let key = CacheKey::new("NOPE", Period::OneMonth);

        let result = cache
            .get_or_fetch(key.clone(), || async {
                Err::<PriceSeries, _>(RiskError::Provider("down".to_string()))
            })
            .await;
        assert!(result.is_err());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_cache_invalidation_and_clear() {
        let cache = PriceCache::new(Duration::from_secs(60));
        for ticker in ["A", "B", "C"] {
            let key = CacheKey::new(ticker, Period::OneYear);
            cache.insert(key, Arc::new(series(ticker, &[1.0]))).await;
        }
        assert_eq!(cache.len().await, 3);

        cache.invalidate(&CacheKey::new("A", Period::OneYear)).await;
        assert!(cache.get(&CacheKey::new("A", Period::OneYear)).await.is_none());
        assert_eq!(cache.len().await, 2);

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let cache = PriceCache::new(Duration::from_secs(60));
        let other = cache.clone();
        other
            .insert(CacheKey::new("A", Period::Max), Arc::new(series("A", &[1.0])))
            .await;
        assert_eq!(cache.len().await, 1);
    }
}
