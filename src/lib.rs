//! navsim: route-following navigation simulator
//!
//! Animates a vehicle along a routed polyline one frame at a time and
//! derives heading, camera moves and a remaining-distance readout.

pub mod config;
pub mod demand;
pub mod error;
pub mod geo;
pub mod haversine;
pub mod navigator;
pub mod osrm;
pub mod polyline;
pub mod simulator;
pub mod stats;
pub mod traits;
