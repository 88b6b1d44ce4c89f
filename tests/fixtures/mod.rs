//! Test fixtures for navsim.
//!
//! Provides:
//! - Amsterdam demo-trip locations and route geometries
//! - A render surface that records everything it is asked to draw

#![allow(dead_code)]

pub mod amsterdam_locations;

pub use amsterdam_locations::*;

use navsim::geo::LngLat;
use navsim::polyline::RoutePolyline;
use navsim::traits::{CameraUpdate, RenderSurface};

/// Render surface that keeps every call for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub cameras: Vec<CameraUpdate>,
    pub overlays: Vec<usize>,
    pub vehicle_track: Vec<(LngLat, f64)>,
}

impl RecordingSurface {
    pub fn headings(&self) -> impl Iterator<Item = f64> + '_ {
        self.vehicle_track.iter().map(|(_, heading)| *heading)
    }

    /// Camera updates that reset the pitch (arrival transitions).
    pub fn pitch_resets(&self) -> usize {
        self.cameras
            .iter()
            .filter(|update| update.pitch == Some(0.0))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn update_camera(&mut self, update: CameraUpdate) {
        self.cameras.push(update);
    }

    fn show_route(&mut self, polyline: &RoutePolyline) {
        self.overlays.push(polyline.len());
    }

    fn place_vehicle(&mut self, position: LngLat, heading: f64) {
        self.vehicle_track.push((position, heading));
    }
}
