//! Trip readout derived from progress along the route.
//!
//! These are display approximations: the route's total distance and
//! duration are scaled by how far the cursor has moved through the
//! polyline, never re-routed.

use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Fraction of the polyline already passed. Zero when there are no points.
pub fn progress_fraction(cursor: usize, total_points: usize) -> f64 {
    if total_points == 0 {
        return 0.0;
    }
    (cursor as f64 / total_points as f64).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripStats {
    pub remaining_distance_m: f64,
    pub remaining_time_s: f64,
    pub eta: NaiveTime,
    completed: bool,
}

impl TripStats {
    pub fn compute(
        total_distance_m: f64,
        total_duration_s: f64,
        cursor: usize,
        total_points: usize,
        now: NaiveDateTime,
    ) -> Self {
        let remaining = 1.0 - progress_fraction(cursor, total_points);
        let remaining_distance_m = (total_distance_m * remaining).max(0.0);
        let remaining_time_s = (total_duration_s * remaining).max(0.0);

        Self {
            remaining_distance_m,
            remaining_time_s,
            eta: eta_after(now, remaining_time_s),
            completed: false,
        }
    }

    /// Readout shown once the trip is over.
    pub fn arrived(now: NaiveDateTime) -> Self {
        Self {
            remaining_distance_m: 0.0,
            remaining_time_s: 0.0,
            eta: now.time(),
            completed: true,
        }
    }

    /// True once the remaining distance rounds to zero at one decimal km.
    pub fn is_complete(&self) -> bool {
        self.completed || format!("{:.1}", self.remaining_distance_m / 1000.0) == "0.0"
    }

    pub fn distance_label(&self) -> String {
        if self.completed {
            return "0 km".to_string();
        }
        format!("{:.1} km", self.remaining_distance_m / 1000.0)
    }

    /// Whole minutes rounded up, never below one while en route.
    pub fn time_label(&self) -> String {
        if self.completed {
            return "0 min".to_string();
        }
        let minutes = ((self.remaining_time_s / 60.0).ceil() as u64).max(1);
        format!("{} min", minutes)
    }

    pub fn eta_label(&self) -> String {
        self.eta.format("%H:%M").to_string()
    }
}

fn eta_after(now: NaiveDateTime, seconds: f64) -> NaiveTime {
    let offset = Duration::milliseconds((seconds * 1000.0).round() as i64);
    now.checked_add_signed(offset).unwrap_or(now).time()
}
