//! Board configuration: view box, snapping, and marker styling.
//!
//! Hosts pass configuration once at mount time, either built in Rust or
//! decoded from JSON with [`BoardConfig::from_json`]. Every field has a
//! default so `{}` is a valid configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::consts::{
    DEFAULT_COLOR, DEFAULT_MARKER_RADIUS, DEFAULT_SNAP_STEP_DEG, MIN_SNAP_STEP_DEG, OUTLINE_COLOR, PREVIEW_COLOR,
    REFERENCE_COLOR,
};
use crate::error::ConfigError;

/// Logical viewable region of the surface, as in the SVG `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl FromStr for ViewBox {
    type Err = ConfigError;

    /// Parse `"min-x min-y width height"`; whitespace and commas both separate.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidViewBox(s.to_string());
        let parts = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|part| !part.is_empty())
            .map(str::parse::<f64>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        let [min_x, min_y, width, height] = parts.as_slice() else {
            return Err(invalid());
        };
        let view_box = Self { min_x: *min_x, min_y: *min_y, width: *width, height: *height };
        let finite = parts.iter().all(|v| v.is_finite());
        if !finite || view_box.width <= 0.0 || view_box.height <= 0.0 {
            return Err(invalid());
        }
        Ok(view_box)
    }
}

impl ViewBox {
    /// CSS `min-width`/`min-height` declarations that keep the surface at
    /// least one device pixel per logical unit.
    #[must_use]
    pub fn min_size_properties(&self) -> [(&'static str, String); 2] {
        [("min-width", format!("{}px", self.width)), ("min-height", format!("{}px", self.height))]
    }
}

impl fmt::Display for ViewBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

impl Serialize for ViewBox {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ViewBox {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Angle snapping settings for the live preview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Whether preview segments snap to `step_degrees` increments.
    pub enabled: bool,
    /// Angle increment in degrees; must lie in `[MIN_SNAP_STEP_DEG, 360]`.
    pub step_degrees: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self { enabled: false, step_degrees: DEFAULT_SNAP_STEP_DEG }
    }
}

impl SnapConfig {
    /// Snapping on, with the given step.
    #[must_use]
    pub fn with_step(step_degrees: f64) -> Self {
        Self { enabled: true, step_degrees }
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSnapStep`] for a non-finite step or one
    /// outside `[MIN_SNAP_STEP_DEG, 360]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.step_degrees;
        if !(MIN_SNAP_STEP_DEG..=360.0).contains(&step) {
            return Err(ConfigError::InvalidSnapStep(step));
        }
        Ok(())
    }
}

/// Full configuration of a drawing board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Logical region mapped onto the element; `None` keeps client pixels.
    pub view_box: Option<ViewBox>,
    pub snap: SnapConfig,
    /// Radius of placed markers and the cursor circle, in surface units.
    pub marker_radius: f64,
    pub reference_color: String,
    pub default_color: String,
    pub preview_color: String,
    pub outline_color: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            view_box: None,
            snap: SnapConfig::default(),
            marker_radius: DEFAULT_MARKER_RADIUS,
            reference_color: REFERENCE_COLOR.to_string(),
            default_color: DEFAULT_COLOR.to_string(),
            preview_color: PREVIEW_COLOR.to_string(),
            outline_color: OUTLINE_COLOR.to_string(),
        }
    }
}

impl BoardConfig {
    /// Decode and validate a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or the first
    /// validation failure from [`BoardConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the snap step or marker radius is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.snap.validate()?;
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(ConfigError::InvalidMarkerRadius(self.marker_radius));
        }
        Ok(())
    }
}
