use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use walkloop::config::Config;
use walkloop::services::directions::DirectionsProvider;
use walkloop::services::leg_cache::CachedDirections;
use walkloop::services::mapbox::{AuthMode, MapboxClient};
use walkloop::services::route_planner::RoutePlanner;
use walkloop::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "walkloop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting walkloop route planner");
    tracing::info!("Configuration loaded successfully");

    // Directions client: direct Mapbox, or a proxy with bearer auth
    let mapbox_client = if let Some(ref base_url) = config.mapbox_base_url {
        tracing::info!("Using directions proxy at {}", base_url);
        MapboxClient::with_config(
            config.mapbox_api_key.clone(),
            base_url.clone(),
            AuthMode::BearerHeader,
        )
    } else {
        MapboxClient::new(config.mapbox_api_key.clone())
    }
    .with_timeout(Duration::from_secs(config.mapbox_timeout_secs))?;

    let directions: Arc<dyn DirectionsProvider> = if config.leg_cache_ttl > 0 {
        tracing::info!(
            ttl_seconds = config.leg_cache_ttl,
            max_entries = config.leg_cache_max_entries,
            "Leg cache enabled"
        );
        Arc::new(CachedDirections::new(
            mapbox_client,
            config.leg_cache_ttl,
            config.leg_cache_max_entries,
        ))
    } else {
        tracing::info!("Leg cache disabled (LEG_CACHE_TTL=0)");
        Arc::new(mapbox_client)
    };

    let route_planner = RoutePlanner::new(directions, config.planner.clone());

    // Create application state
    let state = Arc::new(AppState { route_planner });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", walkloop::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
