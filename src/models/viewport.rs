use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The currently visible map region: center plus angular span in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Viewport {
    pub fn new(center: Coordinates, latitude_delta: f64, longitude_delta: f64) -> Self {
        Viewport {
            center,
            latitude_delta,
            longitude_delta,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.latitude_delta.is_finite() || self.latitude_delta < 0.0 {
            return Err("latitude_delta must be a non-negative number".to_string());
        }
        if !self.longitude_delta.is_finite() || self.longitude_delta < 0.0 {
            return Err("longitude_delta must be a non-negative number".to_string());
        }
        Coordinates::new(self.center.lat, self.center.lng)?;
        Ok(())
    }
}

/// Compass heading in degrees: 0 = north, increasing clockwise.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Heading(pub f64);

impl Heading {
    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Heading wrapped into [0, 360)
    pub fn normalized(self) -> Self {
        let wrapped = self.0.rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if wrapped >= 360.0 {
            Heading(0.0)
        } else {
            Heading(wrapped)
        }
    }

    pub fn rotated(self, degrees: f64) -> Self {
        Heading(self.0 + degrees)
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.0)
    }
}
