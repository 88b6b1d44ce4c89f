//! Environment configuration for the `navsim` demo binary.

use std::time::Duration;

use crate::error::ConfigError;
use crate::geo::LngLat;
use crate::osrm::OsrmConfig;
use crate::simulator::SimOptions;

/// Amsterdam, where the demo trip starts.
pub const DEFAULT_START: LngLat = LngLat::new(4.895168, 52.370216);

pub const DEFAULT_WAYPOINTS: [LngLat; 2] = [
    LngLat::new(4.9041, 52.3676),
    LngLat::new(4.9141, 52.365),
];

#[derive(Debug, Clone)]
pub struct Config {
    pub router: OsrmConfig,
    pub sim: SimOptions,
    pub frame_interval: Duration,
    /// Hard stop for the demo loop, in frames.
    pub max_frames: u64,
    pub start: LngLat,
    pub waypoints: Vec<LngLat>,
    /// Straight-line routing instead of calling the routing service.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            router: OsrmConfig::default(),
            sim: SimOptions::default(),
            frame_interval: Duration::from_secs(1) / 60,
            max_frames: 100_000,
            start: DEFAULT_START,
            waypoints: DEFAULT_WAYPOINTS.to_vec(),
            offline: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("NAVSIM_ROUTER_URL") {
            config.router.base_url = url;
        }
        if let Some(profile) = lookup("NAVSIM_PROFILE") {
            config.router.profile = profile;
        }
        config.router.access_token = lookup("NAVSIM_ACCESS_TOKEN").filter(|t| !t.is_empty());
        if let Some(secs) = parse_var::<u64, _>(&lookup, "NAVSIM_TIMEOUT_SECS")? {
            config.router.timeout_secs = secs;
        }

        if let Some(fps) = parse_var::<u32, _>(&lookup, "NAVSIM_FPS")? {
            if fps == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "NAVSIM_FPS",
                    value: fps.to_string(),
                });
            }
            config.frame_interval = Duration::from_secs(1) / fps;
        }
        if let Some(blend) = parse_var::<f64, _>(&lookup, "NAVSIM_BLEND")? {
            if !(blend > 0.0 && blend <= 1.0) {
                return Err(ConfigError::InvalidValue {
                    name: "NAVSIM_BLEND",
                    value: blend.to_string(),
                });
            }
            config.sim.blend = blend;
        }
        if let Some(frames) = parse_var::<u64, _>(&lookup, "NAVSIM_TOTAL_FRAMES")? {
            config.max_frames = frames;
        }

        if let Some(raw) = lookup("NAVSIM_START") {
            let mut points = parse_coordinates("NAVSIM_START", &raw)?;
            if points.len() != 1 {
                return Err(ConfigError::InvalidCoordinates {
                    name: "NAVSIM_START",
                    value: raw,
                });
            }
            config.start = points.remove(0);
        }
        if let Some(raw) = lookup("NAVSIM_WAYPOINTS") {
            config.waypoints = parse_coordinates("NAVSIM_WAYPOINTS", &raw)?;
        }
        config.offline = lookup("NAVSIM_OFFLINE")
            .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { name, value }),
    }
}

/// Parses `lng,lat;lng,lat`, the same order the routing service takes.
pub fn parse_coordinates(name: &'static str, raw: &str) -> Result<Vec<LngLat>, ConfigError> {
    let invalid = || ConfigError::InvalidCoordinates {
        name,
        value: raw.to_string(),
    };

    raw.split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (lng, lat) = pair.split_once(',').ok_or_else(invalid)?;
            let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;
            let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
            if !(-180.0..=180.0).contains(&lng) || !(-90.0..=90.0).contains(&lat) {
                return Err(invalid());
            }
            Ok(LngLat::new(lng, lat))
        })
        .collect()
}
