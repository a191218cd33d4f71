//! Points and the device-to-surface coordinate mapping.
//!
//! Device positions are client (CSS pixel) coordinates as reported by mouse
//! and touch events. Surface positions are in the SVG's logical user space,
//! i.e. the coordinate system established by its `viewBox`.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use serde::{Deserialize, Serialize};

use crate::config::ViewBox;

/// A point in either device or surface space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Logical-to-device transform of the drawing surface.
///
/// Mirrors the scale and translation entries of an SVG screen CTM:
/// `device = surface * (a, d) + (e, f)`. Rotation and skew are not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceTransform {
    pub a: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl SurfaceTransform {
    pub const IDENTITY: Self = Self { a: 1.0, d: 1.0, e: 0.0, f: 0.0 };

    #[must_use]
    pub fn new(a: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, d, e, f }
    }

    /// Transform applied by `preserveAspectRatio="xMinYMin meet"` when `view_box`
    /// is shown in a `client_w` x `client_h` box whose top-left is the device origin.
    #[must_use]
    pub fn fit_view_box(view_box: &ViewBox, client_w: f64, client_h: f64) -> Self {
        let scale = (client_w / view_box.width).min(client_h / view_box.height);
        Self {
            a: scale,
            d: scale,
            e: -view_box.min_x * scale,
            f: -view_box.min_y * scale,
        }
    }

    /// Whether the transform can be inverted.
    #[must_use]
    pub fn is_invertible(&self) -> bool {
        let finite = self.a.is_finite() && self.d.is_finite() && self.e.is_finite() && self.f.is_finite();
        finite && self.a != 0.0 && self.d != 0.0
    }

    /// Convert a device-space point to surface coordinates.
    ///
    /// A degenerate transform (zero scale or non-finite entries) is logged and
    /// treated as identity.
    #[must_use]
    pub fn map_to_surface(&self, device: Point) -> Point {
        if !self.is_invertible() {
            log::warn!("degenerate surface transform {self:?}; mapping as identity");
            return device;
        }
        Point {
            x: (device.x - self.e) / self.a,
            y: (device.y - self.f) / self.d,
        }
    }

    /// Convert a surface point to device coordinates.
    #[must_use]
    pub fn surface_to_device(&self, surface: Point) -> Point {
        Point {
            x: surface.x * self.a + self.e,
            y: surface.y * self.d + self.f,
        }
    }
}
