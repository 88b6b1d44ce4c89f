//! Amsterdam locations and hand-drawn route geometries for test fixtures.
//!
//! Coordinates are (lng, lat), the order the routing service uses.

use navsim::geo::LngLat;
use navsim::polyline::RoutePolyline;
use navsim::traits::RouteCandidate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lng: f64,
    pub lat: f64,
}

impl Location {
    pub const fn new(name: &'static str, lng: f64, lat: f64) -> Self {
        Self { name, lng, lat }
    }

    pub fn point(&self) -> LngLat {
        LngLat::new(self.lng, self.lat)
    }
}

// ============================================================================
// Demo trip stops
// ============================================================================

pub const DAM_SQUARE: Location = Location::new("Dam Square", 4.895168, 52.370216);
pub const WATERLOOPLEIN: Location = Location::new("Waterlooplein", 4.9041, 52.3676);
pub const WEESPERPLEIN: Location = Location::new("Weesperplein", 4.9141, 52.365);

pub const DEMO_STOPS: &[Location] = &[DAM_SQUARE, WATERLOOPLEIN, WEESPERPLEIN];

// ============================================================================
// Route geometries
// ============================================================================

/// Road-like path from Dam Square to Weesperplein with some bends.
pub const CANAL_RING_PATH: &[[f64; 2]] = &[
    [4.895168, 52.370216],
    [4.896020, 52.369810],
    [4.897410, 52.369320],
    [4.898850, 52.368900],
    [4.900120, 52.368410],
    [4.901530, 52.368050],
    [4.902770, 52.367860],
    [4.904100, 52.367600],
    [4.905680, 52.367190],
    [4.907300, 52.366720],
    [4.909020, 52.366200],
    [4.910880, 52.365760],
    [4.912500, 52.365330],
    [4.914100, 52.365000],
];

/// The canal ring path as a routing-service candidate.
pub fn canal_ring_route() -> RouteCandidate {
    let polyline = RoutePolyline::from_coordinates(CANAL_RING_PATH);
    let distance_m = polyline.length_m() * 1.2;
    RouteCandidate {
        polyline,
        distance_m,
        duration_s: 420.0,
    }
}

/// Two points 0.001 degrees apart along the equator.
pub fn short_hop_route() -> RouteCandidate {
    RouteCandidate {
        polyline: RoutePolyline::new(vec![LngLat::new(0.0, 0.0), LngLat::new(0.001, 0.0)]),
        distance_m: 111.0,
        duration_s: 20.0,
    }
}
