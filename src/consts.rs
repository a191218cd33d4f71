//! Shared defaults for the drawboard crate.

// ── Snapping ────────────────────────────────────────────────────

/// Default angle increment in degrees (16 directions).
pub const DEFAULT_SNAP_STEP_DEG: f64 = 22.5;

/// Smallest accepted angle increment; keeps the step table near 3600 entries.
pub const MIN_SNAP_STEP_DEG: f64 = 0.1;

// ── Markers ─────────────────────────────────────────────────────

/// Radius of placed markers and the cursor preview, in surface units.
pub const DEFAULT_MARKER_RADIUS: f64 = 10.0;

/// Fill of the marker that is the current reference point.
pub const REFERENCE_COLOR: &str = "green";

/// Fill of every other placed marker.
pub const DEFAULT_COLOR: &str = "black";

// ── Preview ─────────────────────────────────────────────────────

/// Stroke/fill of the cursor circle and the dashed preview segment.
pub const PREVIEW_COLOR: &str = "blue";

/// Opacity of the preview primitives.
pub const PREVIEW_OPACITY: f64 = 0.5;

/// `stroke-dasharray` of the preview segment.
pub const PREVIEW_DASH: &str = "2";

/// Stroke of the outline polyline.
pub const OUTLINE_COLOR: &str = "black";
