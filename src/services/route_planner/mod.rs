mod assembly;
pub mod corners;
pub mod trim;

use crate::config::RoutePlannerConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, Heading, RouteLeg, RoutePlan, Viewport};
use crate::services::directions::DirectionsProvider;
use crate::services::leg_cache::LegCacheStats;
use std::sync::Arc;

pub use assembly::assemble_plan;
pub use corners::{compute_corners, CornerSet};
pub use trim::trim;

/// Generates walking loops around the user's position.
///
/// Holds no per-request state: every call builds a fresh plan.
pub struct RoutePlanner {
    directions: Arc<dyn DirectionsProvider>,
    config: RoutePlannerConfig,
}

impl RoutePlanner {
    pub fn new(directions: Arc<dyn DirectionsProvider>, config: RoutePlannerConfig) -> Self {
        RoutePlanner { directions, config }
    }

    pub fn config(&self) -> &RoutePlannerConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.directions.provider_name()
    }

    pub fn cache_stats(&self) -> Option<LegCacheStats> {
        self.directions.cache_stats()
    }

    /// Generate a loop plan for the current viewport and heading.
    ///
    /// Legs run center -> A -> B -> C -> center. The first leg that fails
    /// aborts generation with `LegRequestFailed`; no partial plan is built.
    pub async fn generate_route(
        &self,
        viewport: &Viewport,
        heading: Heading,
        stop_count: i64,
    ) -> Result<RoutePlan> {
        tracing::info!(
            lat = viewport.center.lat,
            lng = viewport.center.lng,
            latitude_delta = viewport.latitude_delta,
            heading = heading.degrees(),
            stop_count,
            "Generating loop: ({:.5}, {:.5}), span {:.4}, heading {}, {} stops",
            viewport.center.lat, viewport.center.lng, viewport.latitude_delta, heading, stop_count
        );

        let corners = compute_corners(viewport, heading, self.config.spread_degrees);
        let vertices = [viewport.center, corners.left, corners.far, corners.right];

        tracing::debug!(
            "Loop corners: A=({:.5}, {:.5}) B=({:.5}, {:.5}) C=({:.5}, {:.5})",
            corners.left.lat,
            corners.left.lng,
            corners.far.lat,
            corners.far.lng,
            corners.right.lat,
            corners.right.lng
        );

        let legs = if self.config.parallel_legs {
            self.fetch_legs_parallel(&vertices).await?
        } else {
            self.fetch_legs_sequential(&vertices).await?
        };

        let plan = assemble_plan(legs, vertices, stop_count);

        tracing::info!(
            title = %plan.title,
            distance_m = plan.est_distance,
            duration_s = plan.est_time,
            stops = plan.stop_annotations.len(),
            steps = plan.step_annotations.len(),
            "Loop generated: '{}', {:.0}m, {:.0}s, {} stops",
            plan.title, plan.est_distance, plan.est_time, plan.stop_annotations.len()
        );

        Ok(plan)
    }

    /// One leg at a time; leg i+1 is not requested until leg i succeeded
    async fn fetch_legs_sequential(&self, vertices: &[Coordinates; 4]) -> Result<[RouteLeg; 4]> {
        let leg1 = self.fetch_leg(1, vertices[0], vertices[1]).await?;
        let leg2 = self.fetch_leg(2, vertices[1], vertices[2]).await?;
        let leg3 = self.fetch_leg(3, vertices[2], vertices[3]).await?;
        let leg4 = self.fetch_leg(4, vertices[3], vertices[0]).await?;
        Ok([leg1, leg2, leg3, leg4])
    }

    /// All four legs in flight at once. Failures are reported in leg order,
    /// regardless of which request finished first.
    async fn fetch_legs_parallel(&self, vertices: &[Coordinates; 4]) -> Result<[RouteLeg; 4]> {
        let (leg1, leg2, leg3, leg4) = futures::join!(
            self.fetch_leg(1, vertices[0], vertices[1]),
            self.fetch_leg(2, vertices[1], vertices[2]),
            self.fetch_leg(3, vertices[2], vertices[3]),
            self.fetch_leg(4, vertices[3], vertices[0]),
        );
        Ok([leg1?, leg2?, leg3?, leg4?])
    }

    async fn fetch_leg(
        &self,
        leg: usize,
        start: Coordinates,
        finish: Coordinates,
    ) -> Result<RouteLeg> {
        match self.directions.fetch_leg(start, finish).await {
            Ok(route_leg) => {
                tracing::debug!(
                    leg,
                    points = route_leg.polyline.len(),
                    steps = route_leg.steps.len(),
                    distance_m = route_leg.distance_meters,
                    "Leg {} fetched: {:.0}m, {} points",
                    leg, route_leg.distance_meters, route_leg.polyline.len()
                );
                Ok(route_leg)
            }
            Err(e) => {
                tracing::warn!(
                    leg,
                    provider = self.directions.provider_name(),
                    error = %e,
                    "Leg {} request failed, aborting loop generation",
                    leg
                );
                Err(AppError::leg_failed(leg, e))
            }
        }
    }
}
