//! Free-explore movement: straight-line steps over the sphere with no road
//! graph involved.

use sw_core::{bearing, destination, distance, normalize_bearing, CompassPoint, GeoPoint};

use crate::summary::MoveSummary;
use crate::{NavError, NavResult};

/// Step and rotation settings for free-explore movement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExploreConfig {
    /// Initial distance covered by one `go`.
    pub step_m: f64,
    /// Initial degrees rotated by one `turn_left` / `turn_right`.
    pub rotation_increment_deg: f64,
    pub min_step_m: f64,
    /// One thousand miles.
    pub max_step_m: f64,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            step_m:                 90.0,
            rotation_increment_deg: 45.0,
            min_step_m:             1.0,
            max_step_m:             1_609_000.0,
        }
    }
}

const MIN_ROTATION_DEG: f64 = 1.0;
const MAX_ROTATION_DEG: f64 = 180.0;
const MAX_HEADING_DEG: f64 = 359.0;

/// Position, heading and step state for free-explore mode.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Explorer {
    position:               GeoPoint,
    heading_deg:            f64,
    step_m:                 f64,
    rotation_increment_deg: f64,
    min_step_m:             f64,
    max_step_m:             f64,
    /// Earlier positions, most recent last.
    history:                Vec<GeoPoint>,
}

impl Explorer {
    /// A non-finite `heading_deg` starts facing north.
    pub fn new(position: GeoPoint, heading_deg: f64, config: &ExploreConfig) -> Self {
        let min_step_m = config.min_step_m.max(f64::MIN_POSITIVE);
        let max_step_m = config.max_step_m.max(min_step_m);
        Self {
            position,
            heading_deg: finite_bearing(heading_deg, 0.0),
            step_m: config.step_m.clamp(min_step_m, max_step_m),
            rotation_increment_deg: config
                .rotation_increment_deg
                .clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG),
            min_step_m,
            max_step_m,
            history: Vec::new(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn position(&self) -> GeoPoint { self.position }
    pub fn heading_deg(&self) -> f64 { self.heading_deg }
    pub fn step_m(&self) -> f64 { self.step_m }
    pub fn rotation_increment_deg(&self) -> f64 { self.rotation_increment_deg }
    pub fn history(&self) -> &[GeoPoint] { &self.history }

    pub fn direction(&self) -> CompassPoint {
        CompassPoint::from_bearing(self.heading_deg)
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move one step along the current heading.
    pub fn go(&mut self) -> MoveSummary {
        let to = destination(self.position, self.heading_deg, self.step_m);
        self.move_to(to)
    }

    /// Jump to `to`, remembering the current position.
    pub fn jump_to(&mut self, to: GeoPoint) -> MoveSummary {
        self.move_to(to)
    }

    /// Jump to a `"lat,lon"` location.
    pub fn jump_to_str(&mut self, text: &str) -> NavResult<MoveSummary> {
        let to: GeoPoint = text.parse()?;
        Ok(self.jump_to(to))
    }

    /// Go back to the most recent remembered position.
    ///
    /// The summary reports the distance and bearing of the move back.
    pub fn return_previous(&mut self) -> NavResult<MoveSummary> {
        let to = self.history.pop().ok_or(NavError::NoPreviousLocation)?;
        let from = self.position;
        self.position = to;
        Ok(MoveSummary::between(from, to))
    }

    /// Place the explorer at `position` facing `heading_deg`, remembering the
    /// position it left.
    pub fn relocate(&mut self, position: GeoPoint, heading_deg: f64) {
        self.history.push(self.position);
        self.position = position;
        self.heading_deg = finite_bearing(heading_deg, self.heading_deg);
    }

    fn move_to(&mut self, to: GeoPoint) -> MoveSummary {
        let from = self.position;
        self.history.push(from);
        self.position = to;
        MoveSummary::between(from, to)
    }

    // ── Heading ───────────────────────────────────────────────────────────

    pub fn turn_left(&mut self) -> f64 {
        self.heading_deg = normalize_bearing(self.heading_deg - self.rotation_increment_deg);
        self.heading_deg
    }

    pub fn turn_right(&mut self) -> f64 {
        self.heading_deg = normalize_bearing(self.heading_deg + self.rotation_increment_deg);
        self.heading_deg
    }

    pub fn turn_around(&mut self) -> f64 {
        self.heading_deg = normalize_bearing(self.heading_deg + 180.0);
        self.heading_deg
    }

    /// Face `heading_deg`, clamped to `[0, 359]`.  Non-finite input leaves
    /// the heading alone.
    pub fn set_heading(&mut self, heading_deg: f64) -> f64 {
        if heading_deg.is_finite() {
            self.heading_deg = heading_deg.clamp(0.0, MAX_HEADING_DEG);
        }
        self.heading_deg
    }

    /// Set the turn increment, clamped to `[1, 180]`.
    pub fn set_rotation_increment(&mut self, deg: f64) -> f64 {
        if deg.is_finite() {
            self.rotation_increment_deg = deg.clamp(MIN_ROTATION_DEG, MAX_ROTATION_DEG);
        }
        self.rotation_increment_deg
    }

    // ── Step size ─────────────────────────────────────────────────────────

    /// Halve the step, not below the minimum.
    pub fn zoom_in(&mut self) -> f64 {
        self.step_m = (self.step_m / 2.0).max(self.min_step_m);
        self.step_m
    }

    /// Double the step, not above the maximum.
    pub fn zoom_out(&mut self) -> f64 {
        self.step_m = (self.step_m * 2.0).min(self.max_step_m);
        self.step_m
    }

    pub fn set_step(&mut self, step_m: f64) -> f64 {
        if step_m.is_finite() {
            self.step_m = step_m.clamp(self.min_step_m, self.max_step_m);
        }
        self.step_m
    }
}

impl MoveSummary {
    fn between(from: GeoPoint, to: GeoPoint) -> Self {
        let bearing_deg = bearing(from, to);
        Self {
            from,
            to,
            bearing_deg,
            direction: CompassPoint::from_bearing(bearing_deg),
            distance_m: distance(from, to),
        }
    }
}

/// `deg` normalised into `[0, 360)`, or `fallback` when it is not finite.
fn finite_bearing(deg: f64, fallback: f64) -> f64 {
    if deg.is_finite() { normalize_bearing(deg) } else { fallback }
}
