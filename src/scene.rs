//! Scene model: placed markers, the outline, and the reference point store.
//!
//! Markers are committed through [`Scene::set_reference`], which is the only
//! way the outline grows. The scene owns markers in placement order; the
//! reference point is a relation to the newest one, stored by id.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DrawError;
use crate::surface::Point;

/// Unique identifier for a placed marker.
pub type MarkerId = Uuid;

/// A visual primitive handed to the scene by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// A circle; the only shape that can become a marker.
    Circle { center: Point, radius: f64 },
    /// A straight segment.
    Line { from: Point, to: Point },
    /// A connected sequence of points.
    Polyline(Vec<Point>),
}

impl Element {
    #[must_use]
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Circle { .. } => ElementKind::Circle,
            Self::Line { .. } => ElementKind::Line,
            Self::Polyline(_) => ElementKind::Polyline,
        }
    }
}

/// Shape tag of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Circle,
    Line,
    Polyline,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Circle => "circle",
            Self::Line => "line",
            Self::Polyline => "polyline",
        };
        f.write_str(name)
    }
}

/// Highlight state of a placed marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    /// The marker is the current reference point.
    Reference,
    Default,
}

/// A placed marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: MarkerId,
    /// Center in surface coordinates; also the outline vertex for this marker.
    pub center: Point,
    pub radius: f64,
    pub highlight: Highlight,
}

/// Ordered, append-only polyline through every placed marker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outline {
    points: Vec<Point>,
}

impl Outline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Points in placement order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Value for the SVG `points` attribute, e.g. `"0,0 10,0"`.
    #[must_use]
    pub fn svg_points(&self) -> String {
        self.points
            .iter()
            .map(|p| format!("{},{}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a successful [`Scene::set_reference`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceChange {
    /// The marker that lost the reference highlight, if any.
    pub previous: Option<MarkerId>,
    /// The newly placed reference marker.
    pub current: MarkerId,
    /// Where the next preview segment starts.
    pub anchor: Point,
}

/// Placed markers, the outline through them, and the current reference.
#[derive(Debug, Default)]
pub struct Scene {
    markers: Vec<Marker>,
    outline: Outline,
    reference: Option<MarkerId>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit `element` as the new reference marker.
    ///
    /// In order: the old reference reverts to [`Highlight::Default`], the new
    /// marker is stored and highlighted, its center is appended to the outline,
    /// and the returned change carries the new preview anchor.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::InvalidReferenceKind`] for anything other than a
    /// circle. The scene is unchanged on error.
    pub fn set_reference(&mut self, element: Element) -> Result<ReferenceChange, DrawError> {
        let (center, radius) = match element {
            Element::Circle { center, radius } => (center, radius),
            other => return Err(DrawError::InvalidReferenceKind { kind: other.kind() }),
        };

        let previous = self.reference.take();
        if let Some(old) = previous.and_then(|id| self.marker_mut(&id)) {
            old.highlight = Highlight::Default;
        }

        let id = Uuid::new_v4();
        self.markers.push(Marker { id, center, radius, highlight: Highlight::Reference });
        self.reference = Some(id);

        self.outline.append(center);

        Ok(ReferenceChange { previous, current: id, anchor: center })
    }

    /// The current reference marker, if any has been placed.
    #[must_use]
    pub fn reference(&self) -> Option<&Marker> {
        self.reference.and_then(|id| self.marker(&id))
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn marker(&self, id: &MarkerId) -> Option<&Marker> {
        self.markers.iter().rev().find(|m| m.id == *id)
    }

    fn marker_mut(&mut self, id: &MarkerId) -> Option<&mut Marker> {
        self.markers.iter_mut().rev().find(|m| m.id == *id)
    }

    /// Markers in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Number of markers placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
