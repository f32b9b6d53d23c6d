use crate::error::Result;
use crate::models::{Coordinates, RouteLeg};
use crate::services::leg_cache::LegCacheStats;
use async_trait::async_trait;
use std::sync::Arc;

/// Walking-directions collaborator: one request per leg, walking mode only.
///
/// The planner wraps any error with the number of the failing leg.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    async fn fetch_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg>;

    /// Short name used in logs and the health endpoint
    fn provider_name(&self) -> &'static str;

    /// Hit/miss counters when the provider is fronted by a leg cache
    fn cache_stats(&self) -> Option<LegCacheStats> {
        None
    }
}

#[async_trait]
impl<P: DirectionsProvider + ?Sized> DirectionsProvider for Arc<P> {
    async fn fetch_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg> {
        (**self).fetch_leg(start, finish).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn cache_stats(&self) -> Option<LegCacheStats> {
        (**self).cache_stats()
    }
}
