use crate::constants::LEG_CACHE_KEY_PRECISION;
use crate::error::Result;
use crate::models::{Coordinates, RouteLeg};
use crate::services::directions::DirectionsProvider;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Cache hit/miss counters, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// In-memory leg cache in front of any directions provider, backed by moka
/// with TTL and bounded capacity. Only successful legs are stored.
pub struct CachedDirections<P> {
    inner: P,
    legs: Cache<String, Arc<RouteLeg>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<P: DirectionsProvider> CachedDirections<P> {
    pub fn new(inner: P, ttl_seconds: u64, max_capacity: u64) -> Self {
        let legs = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        CachedDirections {
            inner,
            legs,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn stats(&self) -> LegCacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        LegCacheStats {
            hits,
            misses,
            hit_rate,
        }
    }
}

/// Cache key for a directed leg; start and finish rounded to ~0.1 m
pub fn leg_cache_key(start: &Coordinates, finish: &Coordinates) -> String {
    let start = start.round(LEG_CACHE_KEY_PRECISION);
    let finish = finish.round(LEG_CACHE_KEY_PRECISION);
    format!(
        "leg:walking:{},{};{},{}",
        start.lat, start.lng, finish.lat, finish.lng
    )
}

#[async_trait]
impl<P: DirectionsProvider> DirectionsProvider for CachedDirections<P> {
    async fn fetch_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg> {
        let key = leg_cache_key(&start, &finish);

        if let Some(leg) = self.legs.get(&key).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("Leg cache hit: {}", key);
            return Ok((*leg).clone());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Leg cache miss: {}", key);

        let leg = self.inner.fetch_leg(start, finish).await?;
        self.legs.insert(key, Arc::new(leg.clone())).await;
        Ok(leg)
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn cache_stats(&self) -> Option<LegCacheStats> {
        Some(self.stats())
    }
}
