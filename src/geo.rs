//! Small spherical-geometry helpers shared by the simulator and routers.

use serde::{Deserialize, Serialize};

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Moves `self` towards `target` by `fraction` on each axis independently.
    pub fn blend_towards(self, target: LngLat, fraction: f64) -> LngLat {
        LngLat {
            lng: self.lng + (target.lng - self.lng) * fraction,
            lat: self.lat + (target.lat - self.lat) * fraction,
        }
    }

    /// Euclidean distance in raw degree space (not meters).
    pub fn degree_distance(self, other: LngLat) -> f64 {
        (other.lng - self.lng).hypot(other.lat - self.lat)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

/// Initial great-circle bearing from `from` to `to`, in degrees clockwise
/// from north, normalized to `[0, 360)`.
pub fn bearing_degrees(from: LngLat, to: LngLat) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let y = delta_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lng.cos();
    let degrees = y.atan2(x).to_degrees().rem_euclid(360.0);

    // rem_euclid can round a tiny negative angle up to exactly 360.0
    if degrees >= 360.0 { 0.0 } else { degrees }
}

/// Haversine distance between two points in kilometers.
pub fn haversine_km(from: LngLat, to: LngLat) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}
