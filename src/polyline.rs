//! Polyline representation for route geometries.
//!
//! Points are stored decoded, longitude first, exactly as the routing
//! service returns them in GeoJSON geometries.

use serde::{Deserialize, Serialize};

use crate::geo::{haversine_km, LngLat};

/// An immutable road path the simulated vehicle follows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoutePolyline {
    points: Vec<LngLat>,
}

impl RoutePolyline {
    pub fn new(points: Vec<LngLat>) -> Self {
        Self { points }
    }

    /// Builds a polyline from GeoJSON `[lng, lat]` pairs.
    pub fn from_coordinates(coordinates: &[[f64; 2]]) -> Self {
        Self {
            points: coordinates.iter().copied().map(LngLat::from).collect(),
        }
    }

    pub fn points(&self) -> &[LngLat] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Option<LngLat> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the final point, `None` when empty.
    pub fn last_index(&self) -> Option<usize> {
        self.points.len().checked_sub(1)
    }

    /// Great-circle length of the path in meters.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| haversine_km(pair[0], pair[1]) * 1000.0)
            .sum()
    }
}
