//! Error types for configuration, the reference store, and the DOM binding.

use crate::scene::ElementKind;

/// Error returned by [`crate::scene::Scene::set_reference`] and the engine entry points.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// Only circle elements can become the reference point.
    #[error("a {kind} element cannot be a reference point")]
    InvalidReferenceKind { kind: ElementKind },
    /// The board configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A DOM call failed in the browser binding.
    #[error("dom operation failed: {0}")]
    Dom(String),
    /// The outline could not be encoded for the host.
    #[error("failed to encode outline: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned while parsing or validating a [`crate::config::BoardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The view box is not four numbers with a positive width and height.
    #[error("invalid view box: {0:?}")]
    InvalidViewBox(String),
    /// Snap steps must lie within `[MIN_SNAP_STEP_DEG, 360]`.
    #[error("invalid snap step: {0}")]
    InvalidSnapStep(f64),
    /// Marker radius must be finite and positive.
    #[error("invalid marker radius: {0}")]
    InvalidMarkerRadius(f64),
    /// The configuration JSON could not be decoded.
    #[error("failed to decode board config: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for DrawError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
