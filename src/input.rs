//! Input model: pointer samples and the live preview state machine.
//!
//! Mouse and touch events are both reduced to a [`PointerSample`] carrying a
//! client-space position, so every input device drives the same logic.
//! [`PreviewState`] tracks whether a reference point exists yet; [`Preview`]
//! is the transient geometry recomputed on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::surface::Point;

/// Which class of device produced a sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    /// Mouse, pen, or any precise pointer.
    #[default]
    Pointer,
    /// First touch point of a touch event.
    Touch,
}

/// One positional input event in device (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Point,
    pub source: InputSource,
}

impl PointerSample {
    #[must_use]
    pub fn pointer(x: f64, y: f64) -> Self {
        Self { position: Point::new(x, y), source: InputSource::Pointer }
    }

    #[must_use]
    pub fn touch(x: f64, y: f64) -> Self {
        Self { position: Point::new(x, y), source: InputSource::Touch }
    }
}

/// A straight segment in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    /// A zero-length segment at `at`.
    #[must_use]
    pub fn collapsed(at: Point) -> Self {
        Self { from: at, to: at }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.from.distance(self.to)
    }
}

/// Live preview geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Preview {
    /// Cursor circle center, already snapped when snapping applies.
    pub cursor: Point,
    /// Dashed segment from the reference point; `None` until the first placement.
    pub segment: Option<Segment>,
}

/// Preview state machine.
///
/// `Idle` until the first marker is placed, then `Anchored` for the rest of
/// the session. The anchor follows every new reference point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PreviewState {
    /// No reference point yet; moves only update the cursor.
    #[default]
    Idle,
    /// A reference point exists; moves draw a segment from `anchor`.
    Anchored {
        /// Start of the preview segment.
        anchor: Point,
    },
}

impl PreviewState {
    #[must_use]
    pub fn anchor(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Anchored { anchor } => Some(*anchor),
        }
    }

    #[must_use]
    pub fn is_anchored(&self) -> bool {
        matches!(self, Self::Anchored { .. })
    }

    /// Move the anchor to `anchor`, entering `Anchored` if idle.
    pub fn reset(&mut self, anchor: Point) {
        *self = Self::Anchored { anchor };
    }

    /// Preview for a cursor at `target` (already mapped and snapped).
    #[must_use]
    pub fn preview(&self, target: Point) -> Preview {
        Preview {
            cursor: target,
            segment: self.anchor().map(|from| Segment { from, to: target }),
        }
    }
}
