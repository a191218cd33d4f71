//! Rendering: applies engine actions to the SVG DOM.
//!
//! This module is the only place that creates or mutates SVG nodes. It
//! receives [`Action`]s from [`crate::engine::EngineCore`] and reflects them
//! on the element. It never mutates engine state.
//!
//! All fallible DOM calls propagate errors as [`DrawError::Dom`].

use std::collections::HashMap;

use web_sys::{Document, Element, SvgsvgElement};

use crate::config::BoardConfig;
use crate::consts::{PREVIEW_DASH, PREVIEW_OPACITY};
use crate::engine::Action;
use crate::error::DrawError;
use crate::input::Preview;
use crate::scene::{Highlight, MarkerId};
use crate::surface::{Point, SurfaceTransform};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// The SVG root plus the primitives the board draws into.
pub struct SvgSurface {
    document: Document,
    root: SvgsvgElement,
    cursor: Element,
    line: Element,
    outline: Element,
    markers: HashMap<MarkerId, Element>,
    reference_color: String,
    default_color: String,
}

impl SvgSurface {
    /// Apply the view box and create the cursor, preview line and outline.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Dom`] if the root is detached or a node cannot be created.
    pub fn new(root: SvgsvgElement, config: &BoardConfig) -> Result<Self, DrawError> {
        let document = root
            .owner_document()
            .ok_or_else(|| DrawError::Dom("svg root has no owner document".to_string()))?;

        if let Some(view_box) = &config.view_box {
            root.set_attribute("viewBox", &view_box.to_string())?;
            root.set_attribute("preserveAspectRatio", "xMinYMin meet")?;
            // Individual properties leave the host's own inline style intact.
            let style = root.style();
            for (property, value) in view_box.min_size_properties() {
                style.set_property(property, &value)?;
            }
        }

        let radius = config.marker_radius.to_string();
        let opacity = PREVIEW_OPACITY.to_string();
        let cursor = create(
            &document,
            "circle",
            &[("r", radius.as_str()), ("fill", config.preview_color.as_str()), ("opacity", opacity.as_str())],
        )?;
        let line = create(
            &document,
            "line",
            &[
                ("stroke", config.preview_color.as_str()),
                ("stroke-dasharray", PREVIEW_DASH),
                ("opacity", opacity.as_str()),
            ],
        )?;
        let outline = create(
            &document,
            "polyline",
            &[("points", ""), ("fill", "none"), ("stroke", config.outline_color.as_str())],
        )?;

        for node in [&cursor, &line, &outline] {
            root.append_child(node)?;
        }

        Ok(Self {
            document,
            root,
            cursor,
            line,
            outline,
            markers: HashMap::new(),
            reference_color: config.reference_color.clone(),
            default_color: config.default_color.clone(),
        })
    }

    /// Current logical-to-client transform of the root, from its screen CTM.
    #[must_use]
    pub fn screen_transform(&self) -> Option<SurfaceTransform> {
        self.root.get_screen_ctm().map(|m| {
            SurfaceTransform::new(f64::from(m.a()), f64::from(m.d()), f64::from(m.e()), f64::from(m.f()))
        })
    }

    /// Reflect `actions` on the DOM, in order.
    ///
    /// # Errors
    ///
    /// Returns the first DOM failure; earlier actions stay applied.
    pub fn apply(&mut self, actions: &[Action]) -> Result<(), DrawError> {
        for action in actions {
            self.apply_one(action)?;
        }
        Ok(())
    }

    fn apply_one(&mut self, action: &Action) -> Result<(), DrawError> {
        match action {
            Action::MarkerPlaced { id, center, radius } => {
                let circle = create(
                    &self.document,
                    "circle",
                    &[
                        ("cx", center.x.to_string().as_str()),
                        ("cy", center.y.to_string().as_str()),
                        ("r", radius.to_string().as_str()),
                        ("fill", self.reference_color.as_str()),
                    ],
                )?;
                self.root.append_child(&circle)?;
                self.markers.insert(*id, circle);
            }
            Action::HighlightChanged { id, highlight } => {
                let Some(circle) = self.markers.get(id) else {
                    log::warn!("highlight change for unknown marker {id}");
                    return Ok(());
                };
                let fill = match highlight {
                    Highlight::Reference => &self.reference_color,
                    Highlight::Default => &self.default_color,
                };
                circle.set_attribute("fill", fill)?;
            }
            Action::OutlineAppended(point) => {
                let vertex = format!("{},{}", point.x, point.y);
                let points = match self.outline.get_attribute("points") {
                    Some(existing) if !existing.is_empty() => format!("{existing} {vertex}"),
                    _ => vertex,
                };
                self.outline.set_attribute("points", &points)?;
            }
            Action::PreviewReset { anchor } => {
                set_line(&self.line, *anchor, *anchor)?;
            }
            Action::PreviewMoved(preview) => self.move_preview(preview)?,
        }
        Ok(())
    }

    fn move_preview(&self, preview: &Preview) -> Result<(), DrawError> {
        self.cursor.set_attribute("cx", &preview.cursor.x.to_string())?;
        self.cursor.set_attribute("cy", &preview.cursor.y.to_string())?;
        if let Some(segment) = preview.segment {
            set_line(&self.line, segment.from, segment.to)?;
        }
        Ok(())
    }
}

fn set_line(line: &Element, from: Point, to: Point) -> Result<(), DrawError> {
    line.set_attribute("x1", &from.x.to_string())?;
    line.set_attribute("y1", &from.y.to_string())?;
    line.set_attribute("x2", &to.x.to_string())?;
    line.set_attribute("y2", &to.y.to_string())?;
    Ok(())
}

fn create(document: &Document, tag: &str, attributes: &[(&str, &str)]) -> Result<Element, DrawError> {
    let element = document.create_element_ns(Some(SVG_NS), tag)?;
    for (name, value) in attributes {
        element.set_attribute(name, value)?;
    }
    Ok(element)
}
