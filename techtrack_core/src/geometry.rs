//! Spherical geometry for technician positions.
//!
//! Distances are great-circle (haversine) on a sphere of mean radius
//! 6,371,008.8 m. No ellipsoidal correction; for the sub-mile separations
//! this system cares about the difference is negligible.

use geo::{point, HaversineDistance};
use serde::{Deserialize, Serialize};

/// Feet per meter, used to express haversine results in feet.
pub const FEET_PER_METER: f64 = 3.280_839_895_013_123;

/// A technician's location at one timestep, in decimal degrees.
///
/// Immutable once read. Note the upstream document stores coordinates in
/// GeoJSON `[longitude, latitude]` order; the loader swaps them before
/// constructing a `Position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Position {
    /// Creates a position from latitude and longitude in decimal degrees.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance to another position, in feet.
    ///
    /// Haversine on a spherical earth; symmetric, and exactly zero for
    /// identical positions.
    pub fn distance_feet(&self, other: &Position) -> f64 {
        let a = point!(x: self.longitude, y: self.latitude);
        let b = point!(x: other.longitude, y: other.latitude);
        a.haversine_distance(&b) * FEET_PER_METER
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
