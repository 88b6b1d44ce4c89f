//! Frame-driven trip navigator.
//!
//! A [`Navigator`] owns at most one trip and a single pending frame. The
//! host calls [`Navigator::on_frame`] from its redraw callback with the
//! ticket it was handed; every start, stop or re-arm invalidates older
//! tickets, so a stale callback can never touch a freshly reset trip.

use chrono::Local;

use crate::geo::LngLat;
use crate::polyline::RoutePolyline;
use crate::simulator::{step, SimOptions, SimState, StepOutcome};
use crate::stats::TripStats;
use crate::traits::{CameraUpdate, RenderSurface, RouteCandidate, RouteProvider};

pub const TRIP_ZOOM: f64 = 17.0;
pub const TRIP_PITCH: f64 = 60.0;
const FOLLOW_EASE_MS: u32 = 50;
const ARRIVAL_EASE_MS: u32 = 2000;

/// Permission to run exactly one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The ticket was cancelled or already used; nothing changed.
    Stale,
    /// Frame handled; schedule the next one with this ticket.
    Continue(FrameTicket),
    /// Trip finished. The loop is stopped. Reported once per trip.
    Completed,
}

#[derive(Debug, Clone)]
struct Trip {
    route: Option<RouteCandidate>,
    state: SimState,
    stats: Option<TripStats>,
    completed: bool,
}

#[derive(Debug, Default)]
pub struct Navigator {
    options: SimOptions,
    trip: Option<Trip>,
    generation: u64,
    pending: bool,
}

impl Navigator {
    pub fn new(options: SimOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replaces any running trip and arms the first frame.
    ///
    /// `route` may be `None` while the routing request is still in flight or
    /// failed; the loop then idles until [`Navigator::attach_route`] is called.
    pub fn start_trip<S: RenderSurface>(
        &mut self,
        start: LngLat,
        route: Option<RouteCandidate>,
        surface: &mut S,
    ) -> FrameTicket {
        self.cancel();

        match &route {
            Some(candidate) => surface.show_route(&candidate.polyline),
            None => surface.show_route(&RoutePolyline::default()),
        }
        surface.place_vehicle(start, 0.0);
        surface.update_camera(CameraUpdate {
            center: Some(start),
            bearing: Some(0.0),
            zoom: Some(TRIP_ZOOM),
            pitch: Some(TRIP_PITCH),
            duration_ms: 0,
        });

        tracing::debug!(
            points = route.as_ref().map(|r| r.polyline.len()).unwrap_or(0),
            "trip started"
        );
        self.trip = Some(Trip {
            route,
            state: SimState::new(start),
            stats: None,
            completed: false,
        });
        self.arm()
    }

    /// Supplies the route for the running trip and restarts progress from
    /// the first point. The vehicle keeps its current position. Returns
    /// false when there is no unfinished trip to attach to.
    pub fn attach_route<S: RenderSurface>(
        &mut self,
        route: RouteCandidate,
        surface: &mut S,
    ) -> bool {
        let Some(trip) = self.trip.as_mut().filter(|trip| !trip.completed) else {
            return false;
        };
        surface.show_route(&route.polyline);
        trip.state.cursor = 0;
        trip.stats = None;
        trip.route = Some(route);
        true
    }

    /// Ends the trip. Any outstanding ticket becomes stale.
    pub fn stop(&mut self) {
        self.cancel();
        if self.trip.take().is_some() {
            tracing::debug!("trip stopped");
        }
    }

    pub fn on_frame<S: RenderSurface>(
        &mut self,
        ticket: FrameTicket,
        surface: &mut S,
    ) -> FrameOutcome {
        if !self.pending || ticket.generation != self.generation {
            return FrameOutcome::Stale;
        }
        self.pending = false;

        let options = self.options;
        let Some(trip) = self.trip.as_mut() else {
            return FrameOutcome::Stale;
        };
        let Some(route) = trip.route.as_ref() else {
            return FrameOutcome::Continue(self.arm());
        };

        let outcome = step(&route.polyline, &trip.state, &options);
        let (next, reached_end) = match outcome {
            StepOutcome::Idle => return FrameOutcome::Continue(self.arm()),
            StepOutcome::Moved(next) => (next, false),
            StepOutcome::Finished(next) => (next, true),
        };

        trip.state = next;
        surface.place_vehicle(next.position, next.heading);
        surface.update_camera(CameraUpdate {
            center: Some(next.position),
            bearing: Some(next.heading),
            duration_ms: FOLLOW_EASE_MS,
            ..CameraUpdate::default()
        });

        let now = Local::now().naive_local();
        let stats = TripStats::compute(
            route.distance_m,
            route.duration_s,
            next.cursor,
            route.polyline.len(),
            now,
        );

        if reached_end || stats.is_complete() {
            trip.completed = true;
            trip.stats = Some(TripStats::arrived(now));
            self.cancel();
            surface.update_camera(CameraUpdate {
                pitch: Some(0.0),
                duration_ms: ARRIVAL_EASE_MS,
                ..CameraUpdate::default()
            });
            tracing::info!(cursor = next.cursor, reached_end, "trip completed");
            return FrameOutcome::Completed;
        }

        trip.stats = Some(stats);
        FrameOutcome::Continue(self.arm())
    }

    pub fn is_running(&self) -> bool {
        self.pending
    }

    pub fn state(&self) -> Option<&SimState> {
        self.trip.as_ref().map(|trip| &trip.state)
    }

    pub fn stats(&self) -> Option<&TripStats> {
        self.trip.as_ref().and_then(|trip| trip.stats.as_ref())
    }

    pub fn route(&self) -> Option<&RouteCandidate> {
        self.trip.as_ref().and_then(|trip| trip.route.as_ref())
    }

    pub fn is_completed(&self) -> bool {
        self.trip.as_ref().is_some_and(|trip| trip.completed)
    }

    fn arm(&mut self) -> FrameTicket {
        self.generation += 1;
        self.pending = true;
        FrameTicket {
            generation: self.generation,
        }
    }

    fn cancel(&mut self) {
        self.generation += 1;
        self.pending = false;
    }
}

/// Fetches a route from `start` through `waypoints` and keeps the primary
/// candidate. Routing failures are logged and treated as "no route".
pub fn plan_route<P: RouteProvider + ?Sized>(
    provider: &P,
    start: LngLat,
    waypoints: &[LngLat],
) -> Option<RouteCandidate> {
    if waypoints.is_empty() {
        return None;
    }

    let mut stops = Vec::with_capacity(waypoints.len() + 1);
    stops.push(start);
    stops.extend_from_slice(waypoints);

    match provider.routes_for(&stops) {
        Ok(routes) => {
            let primary = routes.into_iter().next();
            if primary.is_none() {
                tracing::warn!(waypoints = stops.len(), "routing service returned no routes");
            }
            primary
        }
        Err(err) => {
            tracing::warn!(error = %err, "routing failed; continuing without a route");
            None
        }
    }
}
