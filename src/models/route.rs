//! Route, plan and HTTP request/response types.
//!
//! All JSON keys use snake_case, including the embedded stop markers
//! (`order_index`), so clients see a single key style.

use crate::constants::{MAX_STOP_COUNT, UNTITLED_PLAN_TITLE};
use crate::models::{derive_trace, Coordinates, Heading, StopMarker, Viewport};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One maneuver within a walking leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStep {
    /// Human-readable instruction; may be empty for a leg's arrival step
    pub instructions: String,
    /// Start of the step's own polyline
    pub coordinate: Coordinates,
    pub distance_meters: f64,
}

/// A walking path between two fixed endpoints, as returned by a directions provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteLeg {
    pub name: String,
    pub polyline: Vec<Coordinates>,
    pub steps: Vec<RouteStep>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteLeg {
    pub fn distance_km(&self) -> f64 {
        self.distance_meters / 1000.0
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.duration_seconds / 60.0).round() as u32
    }
}

/// A labeled loop vertex: "A" is the user's position, "B".."D" the computed corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornerMarker {
    pub title: String,
    pub coordinate: Coordinates,
}

/// The assembled result of one loop generation.
///
/// Everything except `stop_annotations` is fixed at construction; the UI may
/// append to or edit the stops afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePlan {
    pub title: String,
    /// Non-empty turn instructions across all kept steps, in order
    pub step_directions: Vec<String>,
    /// One marker per kept step, at the step's start coordinate
    pub step_annotations: Vec<StopMarker>,
    /// Raw polyline of each leg, in leg order
    pub step_polylines: Vec<Vec<Coordinates>>,
    /// Down-sampled stops shown on the map
    pub stop_annotations: Vec<StopMarker>,
    pub corners: Vec<CornerMarker>,
    /// Meters
    pub est_distance: f64,
    /// Seconds
    pub est_time: f64,
}

impl RoutePlan {
    /// A plan with no route yet, holding a single user-placed stop.
    pub fn from_waypoint(coordinate: Coordinates) -> Self {
        let mut plan = RoutePlan {
            title: UNTITLED_PLAN_TITLE.to_string(),
            step_directions: Vec::new(),
            step_annotations: Vec::new(),
            step_polylines: Vec::new(),
            stop_annotations: Vec::new(),
            corners: Vec::new(),
            est_distance: 0.0,
            est_time: 0.0,
        };
        plan.append_stop(coordinate);
        plan
    }

    /// Append a user waypoint, numbered after the existing stops.
    pub fn append_stop(&mut self, coordinate: Coordinates) -> &StopMarker {
        let number = self.stop_annotations.len() as u32 + 1;
        let marker = StopMarker::new(number.to_string(), coordinate)
            .with_id(Uuid::new_v4().to_string())
            .with_order_index(number);

        tracing::debug!(title = %marker.title, "Appending stop {}", marker.title);
        self.stop_annotations.push(marker);
        &self.stop_annotations[self.stop_annotations.len() - 1]
    }

    /// Move the stop with the given title. Returns false if no stop matches.
    pub fn move_stop(&mut self, title: &str, coordinate: Coordinates) -> bool {
        match self.stop_annotations.iter_mut().find(|m| m.title == title) {
            Some(marker) => {
                marker.coordinate = coordinate;
                true
            }
            None => false,
        }
    }

    /// Polyline connecting the current stops, recomputed on each call.
    pub fn stop_polyline(&self) -> Vec<Coordinates> {
        derive_trace(&self.stop_annotations)
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct RoutePlanRequest {
    pub viewport: Viewport,
    #[serde(default)]
    pub heading: Heading,
    /// Falls back to the planner's configured default when absent
    #[serde(default)]
    pub stops: Option<i64>,
}

impl RoutePlanRequest {
    pub fn validate(&self) -> Result<(), String> {
        self.viewport.validate()?;
        if !self.heading.degrees().is_finite() {
            return Err("heading must be a finite number".to_string());
        }
        if let Some(stops) = self.stops {
            if !(0..=MAX_STOP_COUNT).contains(&stops) {
                return Err(format!("stops must be between 0 and {}", MAX_STOP_COUNT));
            }
        }
        Ok(())
    }

    pub fn stop_count_or(&self, default: i64) -> i64 {
        self.stops.unwrap_or(default)
    }
}

#[derive(Debug, Serialize)]
pub struct RoutePlanResponse {
    #[serde(flatten)]
    pub plan: RoutePlan,
    pub stop_polyline: Vec<Coordinates>,
}

impl From<RoutePlan> for RoutePlanResponse {
    fn from(plan: RoutePlan) -> Self {
        let stop_polyline = plan.stop_polyline();
        RoutePlanResponse {
            plan,
            stop_polyline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lng: f64) -> Coordinates {
        Coordinates::new(lat, lng).unwrap()
    }

    #[test]
    fn test_from_waypoint_creates_single_stop() {
        let plan = RoutePlan::from_waypoint(coord(55.6706, 12.5352));

        assert_eq!(plan.title, "Untitled");
        assert_eq!(plan.stop_annotations.len(), 1);
        assert_eq!(plan.stop_annotations[0].title, "1");
        assert_eq!(plan.stop_annotations[0].order_index, Some(1));
        assert!(plan.stop_annotations[0].id.is_some());
        assert!(plan.corners.is_empty());
        assert_eq!(plan.est_distance, 0.0);
    }

    #[test]
    fn test_append_and_move_stops() {
        let mut plan = RoutePlan::from_waypoint(coord(55.6706, 12.5352));
        let appended = plan.append_stop(coord(55.6710, 12.5360)).clone();

        assert_eq!(appended.title, "2");
        assert_eq!(appended.order_index, Some(2));
        assert_eq!(
            plan.stop_polyline(),
            vec![coord(55.6706, 12.5352), coord(55.6710, 12.5360)]
        );

        assert!(plan.move_stop("1", coord(55.6800, 12.5400)));
        assert_eq!(plan.stop_polyline()[0], coord(55.6800, 12.5400));
        assert!(!plan.move_stop("9", coord(55.0, 12.0)));
    }

    #[test]
    fn test_route_plan_request_validation() {
        let mut req = RoutePlanRequest {
            viewport: Viewport::new(coord(55.6706, 12.5352), 0.01, 0.01),
            heading: Heading(0.0),
            stops: Some(10),
        };
        assert!(req.validate().is_ok());

        req.stops = Some(-1);
        assert!(req.validate().is_err());

        req.stops = Some(MAX_STOP_COUNT + 1);
        assert!(req.validate().is_err());

        req.stops = None;
        assert!(req.validate().is_ok());
        assert_eq!(req.stop_count_or(7), 7);

        req.heading = Heading(f64::NAN);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_route_leg_conversions() {
        let leg = RouteLeg {
            name: "Enghavevej".to_string(),
            polyline: vec![],
            steps: vec![],
            distance_meters: 5240.0,
            duration_seconds: 3720.0,
        };

        assert_eq!(leg.distance_km(), 5.24);
        assert_eq!(leg.duration_minutes(), 62);
    }
}
