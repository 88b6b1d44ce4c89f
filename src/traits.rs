//! Seams between the simulator and the outside world.
//!
//! The simulator never talks to a map renderer or a routing backend
//! directly; hosts implement these traits for whatever they drive.

use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::geo::LngLat;
use crate::polyline::RoutePolyline;

/// One route alternative returned by a routing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub polyline: RoutePolyline,
    /// Total distance in meters.
    pub distance_m: f64,
    /// Total duration in seconds.
    pub duration_s: f64,
}

/// Turns an ordered list of waypoints (start first) into route candidates.
///
/// Candidates are ordered by preference; callers only use the first.
pub trait RouteProvider {
    fn routes_for(&self, waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError>;
}

/// A viewport change requested by the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraUpdate {
    pub center: Option<LngLat>,
    pub bearing: Option<f64>,
    pub zoom: Option<f64>,
    pub pitch: Option<f64>,
    /// Linear ease duration in milliseconds. Zero means jump.
    pub duration_ms: u32,
}

/// Where the navigator draws.
pub trait RenderSurface {
    fn update_camera(&mut self, update: CameraUpdate);

    /// Draws the planned route overlay. An empty polyline clears it.
    fn show_route(&mut self, polyline: &RoutePolyline);

    /// Moves the vehicle marker.
    fn place_vehicle(&mut self, position: LngLat, heading: f64);
}
