use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new coordinate.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns the coordinate as exact bit patterns, with `-0.0` folded into `0.0`.
    ///
    /// Two points produce the same key exactly when their coordinates compare
    /// equal, so the key can stand in for the point in hash maps.
    #[must_use]
    pub fn key(&self) -> [u64; 2] {
        [canonical_bits(self.latitude), canonical_bits(self.longitude)]
    }
}

fn canonical_bits(v: f64) -> u64 {
    // -0.0 + 0.0 == +0.0
    (v + 0.0).to_bits()
}

/// A route point annotated with the lane of the segment that starts at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub geo: GeoPoint,
    pub lane: u32,
}

impl RoutePoint {
    /// Creates a new annotated point.
    #[must_use]
    pub fn new(geo: GeoPoint, lane: u32) -> Self {
        Self { geo, lane }
    }
}
