//! Loop corner geometry.
//!
//! Three corners plus the user's position form a rhombus: the user stands at
//! one vertex, the loop opens by `spread` around the (corrected) heading, and
//! the far corner sits on the diagonal. Side length is a quarter of the
//! visible latitudinal extent, so the loop roughly fits the map on screen.

use crate::constants::{HEADING_CORRECTION_DEGREES, VIEWPORT_SPAN_DIVISOR};
use crate::models::{Coordinates, Heading, Viewport};

/// Below this many meters per degree the scale is treated as degenerate
const MIN_DEGREE_LENGTH_M: f64 = 1e-3;

/// Real-world length of one degree at a given point, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegreeLengths {
    pub meters_per_degree_lat: f64,
    pub meters_per_degree_lon: f64,
}

impl DegreeLengths {
    /// Geodesic length of one degree of latitude and of longitude at `center`.
    /// The latitude step heads toward the equator when north of 89°.
    pub fn at(center: &Coordinates) -> Self {
        let lat_step = Coordinates {
            lat: if center.lat + 1.0 > 90.0 {
                center.lat - 1.0
            } else {
                center.lat + 1.0
            },
            lng: center.lng,
        };
        let lon_step = Coordinates {
            lat: center.lat,
            lng: center.lng + 1.0,
        };

        DegreeLengths {
            meters_per_degree_lat: center.geodesic_distance_m(&lat_step),
            meters_per_degree_lon: center.geodesic_distance_m(&lon_step),
        }
    }
}

/// Scale factors for placing corners in degree space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopScale {
    /// Meters per degree of longitude over meters per degree of latitude.
    /// Applied to latitude offsets so the loop is not stretched north-south.
    pub lat_ratio: f64,
    /// Loop side length, in degrees of longitude
    pub dist_ratio: f64,
}

impl LoopScale {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let lengths = DegreeLengths::at(&viewport.center);
        Self::from_lengths(lengths, viewport.latitude_delta)
    }

    fn from_lengths(lengths: DegreeLengths, latitude_delta: f64) -> Self {
        let DegreeLengths {
            meters_per_degree_lat: lat_m,
            meters_per_degree_lon: lon_m,
        } = lengths;

        // A degree of longitude has no length at the poles; collapse onto the center.
        if !(lon_m >= MIN_DEGREE_LENGTH_M && lat_m >= MIN_DEGREE_LENGTH_M)
            || !lon_m.is_finite()
            || !lat_m.is_finite()
        {
            return LoopScale {
                lat_ratio: 0.0,
                dist_ratio: 0.0,
            };
        }

        let side_m = latitude_delta * lat_m / VIEWPORT_SPAN_DIVISOR;

        LoopScale {
            lat_ratio: lon_m / lat_m,
            dist_ratio: side_m / lon_m,
        }
    }

    /// Move `distance` (longitude degrees) from `origin` at `angle_rad`.
    /// Longitude offsets are negated: angle 90° points north.
    fn offset(&self, origin: &Coordinates, distance: f64, angle_rad: f64) -> Coordinates {
        Coordinates {
            lat: origin.lat + distance * self.lat_ratio * angle_rad.sin(),
            lng: origin.lng - distance * angle_rad.cos(),
        }
    }
}

/// The three loop corners, visited center -> left -> far -> right -> center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet {
    pub left: Coordinates,
    pub far: Coordinates,
    pub right: Coordinates,
}

impl CornerSet {
    pub fn as_array(&self) -> [Coordinates; 3] {
        [self.left, self.far, self.right]
    }
}

/// Compute the three loop corners around the viewport center.
///
/// Pure: identical inputs give identical corners. A zero span or zero spread
/// gives coincident points rather than an error.
pub fn compute_corners(viewport: &Viewport, heading: Heading, spread_degrees: f64) -> CornerSet {
    let scale = LoopScale::for_viewport(viewport);
    corners_with_scale(&viewport.center, scale, heading, spread_degrees)
}

fn corners_with_scale(
    center: &Coordinates,
    scale: LoopScale,
    heading: Heading,
    spread_degrees: f64,
) -> CornerSet {
    // Compass heading is rotated a quarter turn before use
    let heading = heading.normalized().rotated(HEADING_CORRECTION_DEGREES).radians();
    let half_spread = spread_degrees.to_radians() / 2.0;

    let diagonal = scale.dist_ratio * half_spread.cos() * 2.0;

    CornerSet {
        left: scale.offset(center, scale.dist_ratio, heading - half_spread),
        far: scale.offset(center, diagonal, heading),
        right: scale.offset(center, scale.dist_ratio, heading + half_spread),
    }
}
