//! Route-following vehicle simulation (pure step function).
//!
//! Each call to [`step`] moves the vehicle a fixed fraction of the way
//! towards the next polyline point. This is exponential-decay smoothing in
//! raw degree space, not constant-speed travel: perceived speed varies with
//! point spacing and latitude.

use serde::{Deserialize, Serialize};

use crate::geo::{bearing_degrees, LngLat};
use crate::polyline::RoutePolyline;

/// Fraction of the remaining gap covered per tick.
pub const DEFAULT_BLEND: f64 = 0.1;

/// Degree-space distance below which the vehicle snaps onto the target point.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 0.00001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimOptions {
    /// Per-tick blend factor, in `(0, 1]`.
    pub blend: f64,
    /// Snap distance in degrees.
    pub snap_threshold: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            blend: DEFAULT_BLEND,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
        }
    }
}

impl SimOptions {
    /// Replaces values that would stall the vehicle with the defaults.
    ///
    /// A blend above 1 is capped at 1. A blend that is NaN, infinite or not
    /// positive, and a snap threshold that is not a positive finite number,
    /// fall back to [`DEFAULT_BLEND`] and [`DEFAULT_SNAP_THRESHOLD`].
    pub fn sanitized(&self) -> Self {
        let blend = if self.blend.is_finite() && self.blend > 0.0 {
            self.blend.min(1.0)
        } else {
            DEFAULT_BLEND
        };
        let snap_threshold = if self.snap_threshold.is_finite() && self.snap_threshold > 0.0 {
            self.snap_threshold
        } else {
            DEFAULT_SNAP_THRESHOLD
        };
        Self {
            blend,
            snap_threshold,
        }
    }
}

/// Vehicle state carried between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Index of the last polyline point reached. Never exceeds `len - 1`.
    pub cursor: usize,
    /// Interpolated position, between `points[cursor]` and `points[cursor + 1]`.
    pub position: LngLat,
    /// Degrees clockwise from north, in `[0, 360)`.
    pub heading: f64,
}

impl SimState {
    pub fn new(start: LngLat) -> Self {
        Self {
            cursor: 0,
            position: start,
            heading: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Nothing to follow yet.
    Idle,
    /// Still en route; schedule another tick.
    Moved(SimState),
    /// Reached the final point. The position is frozen there.
    Finished(SimState),
}

impl StepOutcome {
    pub fn state(&self) -> Option<&SimState> {
        match self {
            StepOutcome::Idle => None,
            StepOutcome::Moved(state) | StepOutcome::Finished(state) => Some(state),
        }
    }
}

/// Advances `state` by one tick along `polyline`.
pub fn step(polyline: &RoutePolyline, state: &SimState, options: &SimOptions) -> StepOutcome {
    let Some(last) = polyline.last_index() else {
        return StepOutcome::Idle;
    };

    if state.cursor >= last {
        let mut frozen = *state;
        frozen.cursor = last;
        if let Some(end) = polyline.get(last) {
            frozen.position = end;
        }
        return StepOutcome::Finished(frozen);
    }

    let Some(target) = polyline.get(state.cursor + 1) else {
        return StepOutcome::Finished(*state);
    };

    let options = options.sanitized();
    let current = state.position;
    let next = current.blend_towards(target, options.blend);

    // A zero-length move has no direction; keep the previous heading.
    let heading = if next == current {
        state.heading
    } else {
        bearing_degrees(current, next)
    };

    let mut advanced = SimState {
        cursor: state.cursor,
        position: next,
        heading,
    };
    if next.degree_distance(target) < options.snap_threshold {
        advanced.cursor += 1;
        advanced.position = target;
    }

    if advanced.cursor >= last {
        StepOutcome::Finished(advanced)
    } else {
        StepOutcome::Moved(advanced)
    }
}
