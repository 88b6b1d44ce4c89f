//! Navigator behaviour across whole trips.
//!
//! Trip restarts, stale frames, completion and routing failures.

mod fixtures;

use fixtures::*;
use navsim::error::RoutingError;
use navsim::geo::LngLat;
use navsim::haversine::HaversineRouter;
use navsim::navigator::{plan_route, FrameOutcome, FrameTicket, Navigator};
use navsim::polyline::RoutePolyline;
use navsim::simulator::SimOptions;
use navsim::traits::{RouteCandidate, RouteProvider};

// ============================================================================
// Helpers
// ============================================================================

/// Runs frames until the loop stops. Returns the frame count and every outcome.
fn run_to_end(
    nav: &mut Navigator,
    mut ticket: FrameTicket,
    surface: &mut RecordingSurface,
) -> (usize, Vec<FrameOutcome>) {
    let mut frames = 0;
    let mut outcomes = Vec::new();
    while frames < 100_000 {
        frames += 1;
        let outcome = nav.on_frame(ticket, surface);
        outcomes.push(outcome);
        match outcome {
            FrameOutcome::Continue(next) => ticket = next,
            FrameOutcome::Completed | FrameOutcome::Stale => break,
        }
    }
    (frames, outcomes)
}

struct FailingRouter;

impl RouteProvider for FailingRouter {
    fn routes_for(&self, _waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError> {
        Err(RoutingError::Service {
            code: "NoRoute".to_string(),
            message: "Impossible route between points".to_string(),
        })
    }
}

struct EmptyRouter;

impl RouteProvider for EmptyRouter {
    fn routes_for(&self, _waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError> {
        Ok(Vec::new())
    }
}

struct TwoCandidates;

impl RouteProvider for TwoCandidates {
    fn routes_for(&self, _waypoints: &[LngLat]) -> Result<Vec<RouteCandidate>, RoutingError> {
        let mut alternative = canal_ring_route();
        alternative.distance_m *= 2.0;
        Ok(vec![canal_ring_route(), alternative])
    }
}

// ============================================================================
// Trip lifecycle
// ============================================================================

#[test]
fn short_hop_finishes_within_fifty_frames() {
    let mut nav = Navigator::new(SimOptions::default());
    let mut surface = RecordingSurface::default();
    let ticket = nav.start_trip(LngLat::new(0.0, 0.0), Some(short_hop_route()), &mut surface);

    let (frames, outcomes) = run_to_end(&mut nav, ticket, &mut surface);

    assert!(frames <= 50, "took {} frames", frames);
    assert_eq!(outcomes.last(), Some(&FrameOutcome::Completed));
    assert_eq!(nav.state().map(|s| s.cursor), Some(1));
}

#[test]
fn canal_ring_trip_reaches_final_point() {
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let route = canal_ring_route();
    let last = route.polyline.get(route.polyline.len() - 1).expect("non-empty");
    let ticket = nav.start_trip(DAM_SQUARE.point(), Some(route), &mut surface);

    let (_, outcomes) = run_to_end(&mut nav, ticket, &mut surface);

    assert_eq!(outcomes.last(), Some(&FrameOutcome::Completed));
    let state = nav.state().expect("trip kept after completion");
    assert_eq!(state.cursor, CANAL_RING_PATH.len() - 1);
    assert_eq!(state.position, last);
    assert!(surface.headings().all(|h| (0.0..360.0).contains(&h)));
    let stats = nav.stats().expect("stats");
    assert_eq!(stats.distance_label(), "0 km");
    assert_eq!(stats.time_label(), "0 min");
}

#[test]
fn cursor_only_moves_forward() {
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let mut ticket = nav.start_trip(DAM_SQUARE.point(), Some(canal_ring_route()), &mut surface);
    let mut previous_cursor = 0;
    let mut previous_remaining = f64::INFINITY;

    loop {
        match nav.on_frame(ticket, &mut surface) {
            FrameOutcome::Continue(next) => ticket = next,
            FrameOutcome::Completed => break,
            FrameOutcome::Stale => panic!("ticket went stale mid-trip"),
        }
        let cursor = nav.state().expect("state").cursor;
        let remaining = nav.stats().expect("stats").remaining_distance_m;
        assert!(cursor >= previous_cursor);
        assert!(remaining <= previous_remaining);
        previous_cursor = cursor;
        previous_remaining = remaining;
    }
}

#[test]
fn completion_fires_once() {
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let first = nav.start_trip(LngLat::new(0.0, 0.0), Some(short_hop_route()), &mut surface);

    let mut ticket = first;
    let mut seen = Vec::new();
    loop {
        let outcome = nav.on_frame(ticket, &mut surface);
        seen.push(outcome);
        match outcome {
            FrameOutcome::Continue(next) => ticket = next,
            _ => break,
        }
    }
    // Late callbacks still holding tickets from the finished loop.
    for _ in 0..10 {
        seen.push(nav.on_frame(ticket, &mut surface));
        seen.push(nav.on_frame(first, &mut surface));
    }

    let completions = seen.iter().filter(|o| **o == FrameOutcome::Completed).count();
    assert_eq!(completions, 1);
    assert_eq!(surface.pitch_resets(), 1);
    assert!(nav.is_completed());
    assert!(!nav.is_running());
}

#[test]
fn completes_early_when_remaining_distance_rounds_to_zero() {
    // 300 m over 40 points: 45 m left at index 34 already shows "0.0 km"
    let points: Vec<LngLat> = (0..40).map(|i| LngLat::new(i as f64 * 0.0001, 0.0)).collect();
    let route = RouteCandidate {
        polyline: RoutePolyline::new(points),
        distance_m: 300.0,
        duration_s: 60.0,
    };
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let ticket = nav.start_trip(LngLat::new(0.0, 0.0), Some(route), &mut surface);

    let (_, outcomes) = run_to_end(&mut nav, ticket, &mut surface);

    assert_eq!(outcomes.last(), Some(&FrameOutcome::Completed));
    assert_eq!(nav.state().map(|s| s.cursor), Some(34));
}

// ============================================================================
// Restarts and cancellation
// ============================================================================

#[test]
fn new_trip_resets_cursor_and_ignores_stale_frames() {
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let mut ticket = nav.start_trip(DAM_SQUARE.point(), Some(canal_ring_route()), &mut surface);
    for _ in 0..200 {
        match nav.on_frame(ticket, &mut surface) {
            FrameOutcome::Continue(next) => ticket = next,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert!(nav.state().expect("state").cursor > 0);
    let stale = ticket;

    let restart = LngLat::new(0.0, 0.0);
    let fresh = nav.start_trip(restart, Some(short_hop_route()), &mut surface);
    assert_eq!(nav.state().map(|s| s.cursor), Some(0));

    let track_len = surface.vehicle_track.len();
    assert_eq!(nav.on_frame(stale, &mut surface), FrameOutcome::Stale);
    assert_eq!(surface.vehicle_track.len(), track_len, "stale frame drew the vehicle");
    assert_eq!(nav.state().map(|s| s.position), Some(restart));

    assert!(matches!(nav.on_frame(fresh, &mut surface), FrameOutcome::Continue(_)));
    let position = nav.state().expect("state").position;
    assert!(position.lng > 0.0 && position.lng < 0.001, "no jump, got {:?}", position);
}

#[test]
fn stop_cancels_pending_frame() {
    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let ticket = nav.start_trip(DAM_SQUARE.point(), Some(canal_ring_route()), &mut surface);
    nav.stop();

    assert_eq!(nav.on_frame(ticket, &mut surface), FrameOutcome::Stale);
    assert!(nav.state().is_none());
    assert!(nav.stats().is_none());
}

// ============================================================================
// Routing
// ============================================================================

#[test]
fn routing_failure_leaves_vehicle_parked() {
    let route = plan_route(&FailingRouter, DAM_SQUARE.point(), &[WATERLOOPLEIN.point()]);
    assert!(route.is_none());

    let mut nav = Navigator::default();
    let mut surface = RecordingSurface::default();
    let mut ticket = nav.start_trip(DAM_SQUARE.point(), route, &mut surface);
    for _ in 0..20 {
        match nav.on_frame(ticket, &mut surface) {
            FrameOutcome::Continue(next) => ticket = next,
            other => panic!("expected idle frame, got {:?}", other),
        }
    }
    assert!(nav.is_running());
    assert_eq!(nav.state().map(|s| s.position), Some(DAM_SQUARE.point()));
    assert_eq!(surface.overlays, vec![0]);
}

#[test]
fn empty_route_response_is_no_route() {
    assert!(plan_route(&EmptyRouter, DAM_SQUARE.point(), &[WEESPERPLEIN.point()]).is_none());
}

#[test]
fn no_waypoints_is_no_route() {
    assert!(plan_route(&HaversineRouter::default(), DAM_SQUARE.point(), &[]).is_none());
}

#[test]
fn primary_candidate_is_used() {
    let route =
        plan_route(&TwoCandidates, DAM_SQUARE.point(), &[WEESPERPLEIN.point()]).expect("route");
    assert_eq!(route, canal_ring_route());
}

#[test]
fn haversine_route_drives_whole_demo_trip() {
    let stops: Vec<LngLat> = DEMO_STOPS.iter().map(|l| l.point()).collect();
    let route = plan_route(&HaversineRouter::default(), stops[0], &stops[1..]).expect("route");
    assert_eq!(route.polyline.len(), 3);

    let mut nav = Navigator::new(SimOptions {
        blend: 0.3,
        ..SimOptions::default()
    });
    let mut surface = RecordingSurface::default();
    let ticket = nav.start_trip(stops[0], Some(route), &mut surface);
    let (_, outcomes) = run_to_end(&mut nav, ticket, &mut surface);

    assert_eq!(outcomes.last(), Some(&FrameOutcome::Completed));
    assert_eq!(nav.state().map(|s| s.position), Some(WEESPERPLEIN.point()));
}
