use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use navsim::config::Config;
use navsim::geo::LngLat;
use navsim::haversine::HaversineRouter;
use navsim::navigator::{plan_route, FrameOutcome, Navigator};
use navsim::osrm::OsrmClient;
use navsim::polyline::RoutePolyline;
use navsim::traits::{CameraUpdate, RenderSurface, RouteProvider};

/// Frames between progress lines at info level.
const REPORT_EVERY: u64 = 60;

/// Render surface that writes the camera stream to the log.
#[derive(Default)]
struct LogSurface {
    camera_updates: u64,
}

impl RenderSurface for LogSurface {
    fn update_camera(&mut self, update: CameraUpdate) {
        self.camera_updates += 1;
        tracing::trace!(
            center = ?update.center,
            bearing = ?update.bearing,
            pitch = ?update.pitch,
            duration_ms = update.duration_ms,
            "camera"
        );
    }

    fn show_route(&mut self, polyline: &RoutePolyline) {
        tracing::info!(
            points = polyline.len(),
            length_m = polyline.length_m().round(),
            "route overlay"
        );
    }

    fn place_vehicle(&mut self, position: LngLat, heading: f64) {
        tracing::trace!(lng = position.lng, lat = position.lat, heading, "vehicle");
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "navsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let provider: Box<dyn RouteProvider> = if config.offline {
        Box::new(HaversineRouter::default())
    } else {
        match OsrmClient::new(config.router.clone()) {
            Ok(client) => Box::new(client),
            Err(err) => {
                tracing::error!("Failed to build routing client: {}", err);
                return ExitCode::FAILURE;
            }
        }
    };

    let route = plan_route(provider.as_ref(), config.start, &config.waypoints);
    if let Some(route) = &route {
        tracing::info!(
            distance_m = route.distance_m,
            duration_s = route.duration_s,
            "route planned"
        );
    }

    let mut surface = LogSurface::default();
    let mut navigator = Navigator::new(config.sim);
    let mut ticket = navigator.start_trip(config.start, route, &mut surface);

    for frame in 1..=config.max_frames {
        std::thread::sleep(config.frame_interval);
        match navigator.on_frame(ticket, &mut surface) {
            FrameOutcome::Continue(next) => ticket = next,
            FrameOutcome::Completed => {
                tracing::info!(
                    frame,
                    camera_updates = surface.camera_updates,
                    "You have reached your destination"
                );
                return ExitCode::SUCCESS;
            }
            FrameOutcome::Stale => break,
        }

        if frame % REPORT_EVERY == 0 {
            if let (Some(state), Some(stats)) = (navigator.state(), navigator.stats()) {
                tracing::info!(
                    frame,
                    cursor = state.cursor,
                    heading = state.heading.round(),
                    remaining = %stats.distance_label(),
                    time_left = %stats.time_label(),
                    eta = %stats.eta_label(),
                    "en route"
                );
            } else {
                tracing::info!(frame, "waiting for a route");
            }
        }
    }

    navigator.stop();
    tracing::warn!(max_frames = config.max_frames, "stopped before reaching the destination");
    ExitCode::FAILURE
}
