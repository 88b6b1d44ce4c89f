//! Haversine route provider (fallback when no routing service is reachable).
//!
//! Connects the waypoints with straight great-circle legs and estimates
//! travel time from an assumed speed. Ignores roads but always available.

use crate::error::RoutingError;
use crate::geo::LngLat;
use crate::polyline::RoutePolyline;
use crate::traits::{RouteCandidate, RouteProvider};

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

#[derive(Debug, Clone)]
pub struct HaversineRouter {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for HaversineRouter {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl HaversineRouter {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in meters to travel time in seconds.
    fn meters_to_seconds(&self, meters: f64) -> f64 {
        if self.speed_kmh <= 0.0 {
            return 0.0;
        }
        let hours = meters / 1000.0 / self.speed_kmh;
        hours * 3600.0
    }
}

impl RouteProvider for HaversineRouter {
    fn routes_for(&self, waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError> {
        if waypoints.len() < 2 {
            return Ok(Vec::new());
        }

        let polyline = RoutePolyline::new(waypoints.to_vec());
        let distance_m = polyline.length_m();
        let duration_s = self.meters_to_seconds(distance_m);

        Ok(vec![RouteCandidate {
            polyline,
            distance_m,
            duration_s,
        }])
    }
}
