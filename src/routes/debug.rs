use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/health - Report the directions provider and planner settings
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let planner = &state.route_planner;
    let config = planner.config();

    let mut status = json!({
        "status": "ok",
        "checks": {
            "directions_provider": planner.provider_name(),
            "spread_degrees": config.spread_degrees,
            "default_stop_count": config.default_stop_count,
            "parallel_legs": config.parallel_legs,
        }
    });

    match planner.cache_stats() {
        Some(stats) => {
            status["checks"]["leg_cache"] = json!({
                "hits": stats.hits,
                "misses": stats.misses,
                "hit_rate": stats.hit_rate,
            });
        }
        None => {
            status["checks"]["leg_cache"] = json!("disabled");
        }
    }

    Json(status)
}
