//! Coordinates, input locations and great-circle distance.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in meters.
    pub fn haversine_m(&self, other: &Coordinate) -> f64 {
        haversine_m(*self, *other)
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// # Examples
///
/// ```
/// use u_lastmile::geo::{haversine_m, Coordinate};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// assert!((haversine_m(a, b) - 111_195.0).abs() < 1.0);
/// ```
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();
    let s1 = (dlat / 2.0).sin();
    let s2 = (dlon / 2.0).sin();
    let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// A stop as supplied by a caller: either a free-text address or a
/// coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputLocation {
    Address {
        address: String,
        #[serde(default)]
        label: Option<String>,
    },
    Point {
        lat: f64,
        lon: f64,
        #[serde(default)]
        label: Option<String>,
    },
}

/// A resolved stop with a display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}
