//! Angle snapping: constrain a segment to the nearest of a fixed set of directions.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use crate::consts::{DEFAULT_SNAP_STEP_DEG, MIN_SNAP_STEP_DEG};
use crate::surface::Point;

/// Snaps candidate points to fixed angle increments around a reference point.
///
/// The step table `[0, step, 2·step, …, 360]` is built once. Angles are
/// measured with `atan2` in surface space (y down) and normalized to `[0, 360)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleSnapper {
    steps: Vec<f64>,
}

impl Default for AngleSnapper {
    fn default() -> Self {
        Self::new(DEFAULT_SNAP_STEP_DEG)
    }
}

impl AngleSnapper {
    /// Build the step table for `step_degrees`.
    ///
    /// The table always ends at 360. Callers validate the step through
    /// [`crate::config::SnapConfig::validate`]; a step outside
    /// `[MIN_SNAP_STEP_DEG, 360]` yields the table `[0, 360]`.
    #[must_use]
    pub fn new(step_degrees: f64) -> Self {
        let mut steps = vec![0.0];
        if (MIN_SNAP_STEP_DEG..=360.0).contains(&step_degrees) {
            let mut k = 1.0;
            while k * step_degrees < 360.0 {
                steps.push(k * step_degrees);
                k += 1.0;
            }
        }
        steps.push(360.0);
        Self { steps }
    }

    /// The ordered step table in degrees.
    #[must_use]
    pub fn steps(&self) -> &[f64] {
        &self.steps
    }

    /// The table entry nearest to `angle_deg` (expected in `[0, 360)`).
    ///
    /// Ties go to the first entry encountered, i.e. the smaller angle: a
    /// candidate exactly halfway between two steps snaps down.
    #[must_use]
    pub fn nearest_step(&self, angle_deg: f64) -> f64 {
        let mut best = self.steps[0];
        let mut best_delta = (angle_deg - best).abs();
        for &step in &self.steps[1..] {
            let delta = (angle_deg - step).abs();
            if delta < best_delta {
                best = step;
                best_delta = delta;
            }
        }
        best
    }

    /// Move `candidate` onto the nearest snapped direction from `reference`,
    /// keeping its distance. A zero-length segment returns `candidate` as-is.
    #[must_use]
    pub fn snap(&self, reference: Point, candidate: Point) -> Point {
        let dx = candidate.x - reference.x;
        let dy = candidate.y - reference.y;
        let distance = dx.hypot(dy);
        if distance == 0.0 {
            return candidate;
        }

        let angle = dy.atan2(dx).to_degrees().rem_euclid(360.0);
        let snapped = self.nearest_step(angle).to_radians();
        Point {
            x: reference.x + distance * snapped.cos(),
            y: reference.y + distance * snapped.sin(),
        }
    }
}

/// One-shot snap with a fresh table for `step_degrees`.
#[must_use]
pub fn snap(reference: Point, candidate: Point, step_degrees: f64) -> Point {
    AngleSnapper::new(step_degrees).snap(reference, candidate)
}
