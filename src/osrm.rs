//! OSRM HTTP adapter for driving routes.
//!
//! Mapbox Directions speaks the same response format, so the client works
//! against either by pointing `base_url`/`profile` at the right service.

use serde::Deserialize;

use crate::error::RoutingError;
use crate::geo::LngLat;
use crate::polyline::RoutePolyline;
use crate::traits::{RouteCandidate, RouteProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Service root up to (not including) the profile, e.g.
    /// `http://localhost:5000/route/v1`.
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    pub access_token: Option<String>,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/route/v1".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
            access_token: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, waypoints: &[LngLat]) -> String {
        let coords = waypoints
            .iter()
            .map(|p| format!("{:.6},{:.6}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/{}/{}?geometries=geojson&overview=full&steps=true",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile,
            coords
        )
    }

    fn route_request(&self, waypoints: &[LngLat]) -> reqwest::blocking::RequestBuilder {
        let request = self.client.get(self.route_url(waypoints));
        match &self.config.access_token {
            Some(token) => request.query(&[("access_token", token.as_str())]),
            None => request,
        }
    }
}

impl RouteProvider for OsrmClient {
    fn routes_for(&self, waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError> {
        if waypoints.len() < 2 {
            return Ok(Vec::new());
        }

        tracing::debug!(
            waypoints = waypoints.len(),
            profile = %self.config.profile,
            "requesting route"
        );

        let body = self
            .route_request(waypoints)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>())?;

        if let Some(code) = body.code.as_deref() {
            if code != "Ok" {
                return Err(RoutingError::Service {
                    code: code.to_string(),
                    message: body.message.unwrap_or_default(),
                });
            }
        }

        body.routes
            .unwrap_or_default()
            .into_iter()
            .map(OsrmRoute::into_candidate)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: Option<String>,
    message: Option<String>,
    routes: Option<Vec<OsrmRoute>>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    #[serde(rename = "type")]
    kind: Option<String>,
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRoute {
    fn into_candidate(self) -> Result<RouteCandidate, RoutingError> {
        if let Some(kind) = self.geometry.kind.as_deref() {
            if kind != "LineString" {
                return Err(RoutingError::BadGeometry(format!(
                    "expected LineString, got {}",
                    kind
                )));
            }
        }

        Ok(RouteCandidate {
            polyline: RoutePolyline::from_coordinates(&self.geometry.coordinates),
            distance_m: self.distance,
            duration_s: self.duration,
        })
    }
}
