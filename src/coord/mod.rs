//! Coordinate and candidate value types
//!
//! A `Candidate` is one labeled search result from a provider; `Coordinates`
//! is a plain (latitude, longitude) pair in degrees.

use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: strictly between -90 and 90
    /// Longitude: strictly between -180 and 180
    ///
    /// The bounds are exclusive: the poles and the antimeridian are not
    /// deliverable results.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.lat <= -90.0 || self.lat >= 90.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Latitude {} is out of range (-90, 90)",
                self.lat
            )));
        }
        if self.lng <= -180.0 || self.lng >= 180.0 {
            return Err(crate::error::Error::InvalidCoordinates(format!(
                "Longitude {} is out of range (-180, 180)",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// One search result: a labeled coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Display label for this result (address or description)
    pub description: String,

    /// The result's coordinate
    pub coords: Coordinates,
}

impl Candidate {
    /// Create a new candidate
    pub fn new(description: impl Into<String>, coords: Coordinates) -> Self {
        Self {
            description: description.into(),
            coords,
        }
    }
}
