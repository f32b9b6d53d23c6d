use geo::{Distance, Geodesic, Point};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!(
                "Invalid latitude: {} (must be between -90 and 90)",
                lat
            ));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(format!(
                "Invalid longitude: {} (must be between -180 and 180)",
                lng
            ));
        }
        Ok(Coordinates { lat, lng })
    }

    /// Geodesic distance on the WGS84 ellipsoid, in meters.
    /// Both points must have latitudes within [-90, 90]; longitudes may wrap.
    pub fn geodesic_distance_m(&self, other: &Coordinates) -> f64 {
        Geodesic.distance(self.to_point(), other.to_point())
    }

    /// Round coordinates to specified decimal places for caching
    pub fn round(&self, decimal_places: u32) -> Self {
        let multiplier = 10_f64.powi(decimal_places as i32);
        Coordinates {
            lat: (self.lat * multiplier).round() / multiplier,
            lng: (self.lng * multiplier).round() / multiplier,
        }
    }

    /// geo uses (x, y) = (lng, lat)
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_validation() {
        assert!(Coordinates::new(55.6706, 12.5352).is_ok());
        assert!(Coordinates::new(91.0, 0.0).is_err()); // Invalid lat
        assert!(Coordinates::new(0.0, 181.0).is_err()); // Invalid lng
    }

    #[test]
    fn test_distance_calculation() {
        let copenhagen = Coordinates::new(55.6761, 12.5683).unwrap();
        let malmo = Coordinates::new(55.6050, 13.0038).unwrap();

        // Copenhagen to Malmo is approximately 28 km
        let distance = copenhagen.geodesic_distance_m(&malmo);
        assert!((distance - 28_000.0).abs() < 3_000.0, "got {}", distance);
    }

    #[test]
    fn test_geodesic_degree_lengths() {
        let start = Coordinates::new(55.6706, 12.5352).unwrap();
        let one_lat = Coordinates {
            lat: start.lat + 1.0,
            lng: start.lng,
        };
        let one_lng = Coordinates {
            lat: start.lat,
            lng: start.lng + 1.0,
        };

        // ~111.3 km per degree of latitude, ~62.9 km per degree of longitude at 55.67N
        let lat_m = start.geodesic_distance_m(&one_lat);
        let lng_m = start.geodesic_distance_m(&one_lng);
        assert!((lat_m - 111_350.0).abs() < 500.0, "got {}", lat_m);
        assert!((lng_m - 62_900.0).abs() < 500.0, "got {}", lng_m);
    }

    #[test]
    fn test_rounding() {
        let coords = Coordinates::new(55.670660, 12.535274).unwrap();
        let rounded = coords.round(3);
        assert_eq!(rounded.lat, 55.671);
        assert_eq!(rounded.lng, 12.535);
    }

    #[test]
    fn test_point_conversion() {
        let coords = Coordinates::new(55.6706, 12.5352).unwrap();
        let point = coords.to_point();
        assert_eq!(point.x(), 12.5352);
        assert_eq!(point.y(), 55.6706);
    }
}
