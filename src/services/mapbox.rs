use crate::error::{AppError, Result};
use crate::models::{Coordinates, RouteLeg, RouteStep};
use crate::services::directions::DirectionsProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// Loops are always walked
const WALKING_PROFILE: &str = "walking";

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }

    /// Replace the HTTP client with one that enforces a per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    /// Get walking directions for a single leg.
    /// Returns the first route with full geometry, steps, distance, and duration.
    pub async fn get_walking_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg> {
        // Format coordinates as "lng,lat;lng,lat"
        let coordinates_str = format!(
            "{},{};{},{}",
            start.lng, start.lat, finish.lng, finish.lat
        );

        let url = format!("{}/{}/{}", self.base_url, WALKING_PROFILE, coordinates_str);

        tracing::debug!(
            start_lat = start.lat,
            start_lng = start.lng,
            finish_lat = finish.lat,
            finish_lng = finish.lng,
            "Mapbox API request: ({:.5}, {:.5}) -> ({:.5}, {:.5})",
            start.lat, start.lng, finish.lat, finish.lng
        );

        let mut request = self.client.get(&url).query(&[
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "true"),
        ]);

        match self.auth_mode {
            AuthMode::DirectToken => {
                request = request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                "Mapbox API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        let leg = directions.into_route_leg()?;

        tracing::debug!(
            distance_km = %format!("{:.2}", leg.distance_km()),
            duration_min = leg.duration_minutes(),
            path_points = leg.polyline.len(),
            steps = leg.steps.len(),
            "Mapbox response: {:.2}km, {}min, {} path points, {} steps",
            leg.distance_km(), leg.duration_minutes(), leg.polyline.len(), leg.steps.len()
        );

        Ok(leg)
    }
}

#[async_trait]
impl DirectionsProvider for MapboxClient {
    async fn fetch_leg(&self, start: Coordinates, finish: Coordinates) -> Result<RouteLeg> {
        self.get_walking_leg(start, finish).await
    }

    fn provider_name(&self) -> &'static str {
        "mapbox"
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<MapboxRoute>,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    distance: f64, // meters
    duration: f64, // seconds
    geometry: MapboxGeometry,
    #[serde(default)]
    legs: Vec<MapboxLeg>,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    steps: Vec<MapboxStep>,
}

#[derive(Debug, Deserialize)]
struct MapboxStep {
    distance: f64,
    #[serde(default)]
    name: String,
    geometry: MapboxGeometry,
    maneuver: MapboxManeuver,
}

#[derive(Debug, Deserialize)]
struct MapboxManeuver {
    #[serde(default)]
    instruction: String,
    location: [f64; 2], // [lng, lat]
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
}

/// Convert GeoJSON [lng, lat] pairs to our Coordinates type, dropping invalid ones
fn to_coordinates(geometry: &[[f64; 2]]) -> Vec<Coordinates> {
    geometry
        .iter()
        .filter_map(|coord| Coordinates::new(coord[1], coord[0]).ok())
        .collect()
}

impl MapboxDirectionsApiResponse {
    fn into_route_leg(self) -> Result<RouteLeg> {
        if self.code == "NoRoute" || self.routes.is_empty() {
            tracing::warn!(code = %self.code, "Mapbox returned 0 routes");
            return Err(AppError::NoRouteFound(
                self.message
                    .unwrap_or_else(|| "No walking route between these points".to_string()),
            ));
        }
        if self.code != "Ok" {
            return Err(AppError::DirectionsApi(format!(
                "{}: {}",
                self.code,
                self.message.unwrap_or_default()
            )));
        }

        let route = self.routes.into_iter().next().ok_or_else(|| {
            AppError::NoRouteFound("No walking route between these points".to_string())
        })?;

        let mut name = String::new();
        let mut steps = Vec::new();
        for leg in route.legs {
            if name.is_empty() {
                name = leg.summary;
            }
            for step in leg.steps {
                // Step start: first point of its own geometry, maneuver location as fallback
                let start = step
                    .geometry
                    .coordinates
                    .first()
                    .copied()
                    .unwrap_or(step.maneuver.location);
                let Ok(coordinate) = Coordinates::new(start[1], start[0]) else {
                    tracing::warn!(step = %step.name, "Skipping step with invalid coordinates");
                    continue;
                };
                steps.push(RouteStep {
                    instructions: step.maneuver.instruction,
                    coordinate,
                    distance_meters: step.distance,
                });
            }
        }

        Ok(RouteLeg {
            name,
            polyline: to_coordinates(&route.geometry.coordinates),
            steps,
            distance_meters: route.distance,
            duration_seconds: route.duration,
        })
    }
}
