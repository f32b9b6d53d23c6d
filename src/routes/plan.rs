use crate::error::{AppError, Result};
use crate::models::route::{RoutePlanRequest, RoutePlanResponse};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /routes/plan
/// Generate a four-leg walking loop around the viewport center
pub async fn create_route_plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoutePlanRequest>,
) -> Result<Json<RoutePlanResponse>> {
    // Validate request
    request.validate().map_err(AppError::InvalidRequest)?;

    let stop_count = request.stop_count_or(state.route_planner.config().default_stop_count);

    tracing::info!(
        lat = request.viewport.center.lat,
        lng = request.viewport.center.lng,
        heading = request.heading.degrees(),
        stops = stop_count,
        "Route plan request: ({:.4}, {:.4}), heading {}, {} stops",
        request.viewport.center.lat,
        request.viewport.center.lng,
        request.heading,
        stop_count
    );

    let plan = state
        .route_planner
        .generate_route(&request.viewport, request.heading, stop_count)
        .await?;

    Ok(Json(RoutePlanResponse::from(plan)))
}
