use std::sync::Arc;
use walkloop::config::RoutePlannerConfig;
use walkloop::models::{Coordinates, Heading};
use walkloop::services::directions::DirectionsProvider;
use walkloop::services::mapbox::MapboxClient;
use walkloop::services::route_planner::RoutePlanner;

mod common;

fn client() -> MapboxClient {
    let api_key =
        std::env::var("MAPBOX_API_KEY").expect("MAPBOX_API_KEY must be set for integration tests");
    MapboxClient::new(api_key)
}

#[tokio::test]
async fn test_mapbox_walking_leg() {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return;
    }

    // Enghave Park to Carlsberg Byen, Copenhagen
    let start = Coordinates::new(55.6706, 12.5352).unwrap();
    let finish = Coordinates::new(55.6660, 12.5340).unwrap();

    let leg = client()
        .fetch_leg(start, finish)
        .await
        .expect("Mapbox walking leg should succeed");

    assert!(leg.distance_meters > 0.0, "Distance should be positive");
    assert!(leg.duration_seconds > 0.0, "Duration should be positive");
    assert!(leg.polyline.len() >= 2, "Polyline should have points");
    assert!(!leg.steps.is_empty(), "Steps should be requested");
    assert!(
        leg.steps.iter().any(|s| !s.instructions.is_empty()),
        "At least one step should carry an instruction"
    );

    // Rough sanity check: ~500m as the crow flies
    assert!(
        leg.distance_km() > 0.3 && leg.distance_km() < 3.0,
        "Distance should be reasonable: got {}km",
        leg.distance_km()
    );
}

#[tokio::test]
async fn test_mapbox_full_loop() {
    if common::should_skip_real_api_tests() {
        println!("Skipping real API test");
        return;
    }

    let planner = RoutePlanner::new(Arc::new(client()), RoutePlannerConfig::default());

    let plan = planner
        .generate_route(&common::copenhagen_viewport(), Heading(0.0), 10)
        .await
        .expect("Loop around Enghave Park should be walkable");

    assert_eq!(plan.corners.len(), 4);
    assert_eq!(plan.step_polylines.len(), 4);
    assert!(plan.stop_annotations.len() <= 10);
    assert!(plan.est_distance > 0.0);
    assert!(!plan.step_directions.is_empty());

    // Loop returns near the start
    let first = plan.step_polylines[0].first().unwrap();
    let last = plan.step_polylines[3].last().unwrap();
    let gap_m = first.geodesic_distance_m(last);
    assert!(gap_m < 100.0, "Loop should return to start (gap: {:.1}m)", gap_m);
}
