use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use walkloop::error::{AppError, Result};
use walkloop::models::{Coordinates, RouteLeg, RouteStep, Viewport};
use walkloop::services::directions::DirectionsProvider;

/// Directions provider that replays queued legs and records every request
#[allow(dead_code)]
pub struct MockDirections {
    responses: Mutex<VecDeque<Result<RouteLeg>>>,
    requests: Mutex<Vec<(Coordinates, Coordinates)>>,
}

#[allow(dead_code)]
impl MockDirections {
    pub fn new(responses: Vec<Result<RouteLeg>>) -> Self {
        MockDirections {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Coordinates, Coordinates)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl DirectionsProvider for MockDirections {
    async fn fetch_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg> {
        self.requests.lock().unwrap().push((start, finish));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::Internal("no mocked leg left".to_string())))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Viewport over Enghave Park, Copenhagen
#[allow(dead_code)]
pub fn copenhagen_viewport() -> Viewport {
    Viewport::new(Coordinates::new(55.6706, 12.5352).unwrap(), 0.01, 0.01)
}

/// A leg with `points` polyline points and one step per point; the last step
/// has no instruction, like an arrival maneuver.
#[allow(dead_code)]
pub fn create_test_leg(index: usize, points: usize, distance_m: f64, duration_s: f64) -> RouteLeg {
    let polyline: Vec<Coordinates> = (0..points)
        .map(|p| {
            Coordinates::new(
                55.6706 + index as f64 * 0.001,
                12.5352 + p as f64 * 0.0001,
            )
            .unwrap()
        })
        .collect();

    let steps = polyline
        .iter()
        .enumerate()
        .map(|(i, coordinate)| RouteStep {
            instructions: if i + 1 == points {
                String::new()
            } else {
                format!("Leg {} step {}", index, i + 1)
            },
            coordinate: *coordinate,
            distance_meters: distance_m / points as f64,
        })
        .collect();

    RouteLeg {
        name: format!("Leg {} street", index),
        polyline,
        steps,
        distance_meters: distance_m,
        duration_seconds: duration_s,
    }
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("MAPBOX_API_KEY").is_err()
}
