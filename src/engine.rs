use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Event, MouseEvent, SvgsvgElement, TouchEvent};

use crate::config::BoardConfig;
use crate::error::DrawError;
use crate::input::{PointerSample, Preview, PreviewState, Segment};
use crate::listeners::Listeners;
use crate::render::SvgSurface;
use crate::scene::{Element, Highlight, Marker, MarkerId, Scene};
use crate::snap::AngleSnapper;
use crate::surface::{Point, SurfaceTransform};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Changes produced by an input handler, for the host to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A new marker exists and is the reference point.
    MarkerPlaced { id: MarkerId, center: Point, radius: f64 },
    /// An existing marker's highlight changed.
    HighlightChanged { id: MarkerId, highlight: Highlight },
    /// A point was appended to the outline.
    OutlineAppended(Point),
    /// The preview segment collapsed onto a new anchor.
    PreviewReset { anchor: Point },
    /// The cursor (and segment, when anchored) moved.
    PreviewMoved(Preview),
}

/// Interaction state and logic that does not touch the DOM.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
#[derive(Debug)]
pub struct EngineCore {
    pub scene: Scene,
    pub state: PreviewState,
    pub transform: SurfaceTransform,
    preview: Option<Preview>,
    snapper: Option<AngleSnapper>,
    config: BoardConfig,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            state: PreviewState::default(),
            transform: SurfaceTransform::IDENTITY,
            preview: None,
            snapper: None,
            config: BoardConfig::default(),
        }
    }
}

impl EngineCore {
    /// Build a core for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Config`] if `config` fails validation.
    pub fn new(config: BoardConfig) -> Result<Self, DrawError> {
        config.validate()?;
        let snapper = config
            .snap
            .enabled
            .then(|| AngleSnapper::new(config.snap.step_degrees));
        Ok(Self { snapper, config, ..Self::default() })
    }

    // --- Transform ---

    /// Replace the device-to-surface transform.
    pub fn set_transform(&mut self, transform: SurfaceTransform) {
        self.transform = transform;
    }

    /// Derive the transform from the configured view box and the element's
    /// client size. Without a view box the mapping is identity.
    pub fn fit_view_box(&mut self, client_w: f64, client_h: f64) {
        self.transform = match &self.config.view_box {
            Some(view_box) => SurfaceTransform::fit_view_box(view_box, client_w, client_h),
            None => SurfaceTransform::IDENTITY,
        };
    }

    // --- Input events ---

    /// Place a marker at `sample` and make it the reference point.
    ///
    /// # Errors
    ///
    /// Propagates [`DrawError::InvalidReferenceKind`] from the scene; prior
    /// state is untouched on error.
    pub fn place_at(&mut self, sample: PointerSample) -> Result<Vec<Action>, DrawError> {
        let center = self.transform.map_to_surface(sample.position);
        let radius = self.config.marker_radius;
        let change = self.scene.set_reference(Element::circle(center, radius))?;

        self.state.reset(change.anchor);
        let first_preview = self.preview.is_none();
        let cursor = self.preview.map_or(change.anchor, |p| p.cursor);
        let preview = Preview { cursor, segment: Some(Segment::collapsed(change.anchor)) };
        self.preview = Some(preview);

        log::debug!(
            "placed marker {} at ({}, {}) via {:?}; outline has {} points",
            change.current,
            center.x,
            center.y,
            sample.source,
            self.scene.outline().len()
        );

        let mut actions = Vec::with_capacity(5);
        if let Some(previous) = change.previous {
            actions.push(Action::HighlightChanged { id: previous, highlight: Highlight::Default });
        }
        actions.push(Action::MarkerPlaced { id: change.current, center, radius });
        actions.push(Action::OutlineAppended(center));
        actions.push(Action::PreviewReset { anchor: change.anchor });
        if first_preview {
            // Without a prior move the DOM cursor still sits at its initial spot.
            actions.push(Action::PreviewMoved(preview));
        }
        Ok(actions)
    }

    /// Update the live preview for a pointer at `sample`.
    pub fn preview_at(&mut self, sample: PointerSample) -> Vec<Action> {
        let candidate = self.transform.map_to_surface(sample.position);
        let target = match (self.state.anchor(), &self.snapper) {
            (Some(anchor), Some(snapper)) => snapper.snap(anchor, candidate),
            _ => candidate,
        };

        let preview = self.state.preview(target);
        self.preview = Some(preview);
        log::trace!("preview at ({}, {}) via {:?}", target.x, target.y, sample.source);
        vec![Action::PreviewMoved(preview)]
    }

    // --- Queries ---

    /// Placed points in order.
    #[must_use]
    pub fn outline(&self) -> &[Point] {
        self.scene.outline().points()
    }

    /// The outline as a JSON array of `{x, y}` objects.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Json`] if encoding fails.
    pub fn outline_json(&self) -> Result<String, DrawError> {
        Ok(serde_json::to_string(self.scene.outline())?)
    }

    /// Markers in placement order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        self.scene.markers()
    }

    /// The current reference marker, if any.
    #[must_use]
    pub fn reference(&self) -> Option<&Marker> {
        self.scene.reference()
    }

    /// The most recent preview, if the pointer has moved or a marker was placed.
    #[must_use]
    pub fn preview(&self) -> Option<Preview> {
        self.preview
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn snapping(&self) -> bool {
        self.snapper.is_some()
    }
}

/// Reduce a mouse or touch event to a client-space sample.
///
/// Touch events use the first changed-or-active touch point; anything else
/// yields `None`.
#[must_use]
pub fn sample_from_event(event: &Event) -> Option<PointerSample> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(PointerSample::pointer(f64::from(mouse.client_x()), f64::from(mouse.client_y())));
    }
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    let touch = touch_event
        .touches()
        .get(0)
        .or_else(|| touch_event.changed_touches().get(0))?;
    Some(PointerSample::touch(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Core plus the DOM it draws into; shared by the listener closures.
struct Mounted {
    core: EngineCore,
    surface: SvgSurface,
}

impl Mounted {
    fn sync_transform(&mut self) {
        if let Some(transform) = self.surface.screen_transform() {
            self.core.set_transform(transform);
        }
    }

    fn place(&mut self, sample: PointerSample) -> Result<(), DrawError> {
        self.sync_transform();
        let actions = self.core.place_at(sample)?;
        self.surface.apply(&actions)
    }

    fn preview(&mut self, sample: PointerSample) -> Result<(), DrawError> {
        self.sync_transform();
        let actions = self.core.preview_at(sample);
        self.surface.apply(&actions)
    }
}

type Handler = fn(&mut Mounted, PointerSample) -> Result<(), DrawError>;

/// The full drawing engine bound to an `<svg>` element.
///
/// Mounting creates the preview primitives and subscribes to `click`,
/// `mousemove`, `touchstart` and `touchmove`. Dropping the engine removes
/// the listeners.
pub struct Engine {
    mounted: Rc<RefCell<Mounted>>,
    listeners: Listeners,
}

impl Engine {
    /// Mount a drawing board on `svg`.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Config`] for an invalid configuration or
    /// [`DrawError::Dom`] if the preview primitives or listeners cannot be
    /// created.
    pub fn mount(svg: SvgsvgElement, config: BoardConfig) -> Result<Self, DrawError> {
        let core = EngineCore::new(config)?;
        let surface = SvgSurface::new(svg.clone(), core.config())?;
        let mounted = Rc::new(RefCell::new(Mounted { core, surface }));

        let mut listeners = Listeners::new(svg.into());
        let bindings: [(&'static str, Handler); 4] = [
            ("click", Mounted::place),
            ("mousemove", Mounted::preview),
            ("touchstart", Mounted::preview),
            ("touchmove", Mounted::preview),
        ];
        for (event_name, handler) in bindings {
            let mounted = Rc::clone(&mounted);
            listeners.listen(event_name, move |event: Event| {
                let Some(sample) = sample_from_event(&event) else {
                    return;
                };
                let Ok(mut guard) = mounted.try_borrow_mut() else {
                    log::warn!("{event_name} dropped: board is busy");
                    return;
                };
                if let Err(err) = handler(&mut *guard, sample) {
                    log::error!("{event_name} handler failed: {err}");
                }
            })?;
        }

        log::debug!("drawboard mounted; listening for {}", listeners.events().collect::<Vec<_>>().join(", "));
        Ok(Self { mounted, listeners })
    }

    // --- Input events ---

    /// Place a marker at a client-space position, as a click would.
    ///
    /// # Errors
    ///
    /// Returns the placement or DOM error; prior state is untouched on a
    /// placement error.
    pub fn place_at(&self, sample: PointerSample) -> Result<(), DrawError> {
        self.with_mounted(|mounted| mounted.place(sample))
    }

    /// Move the live preview to a client-space position.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Dom`] if the preview primitives cannot be updated.
    pub fn preview_at(&self, sample: PointerSample) -> Result<(), DrawError> {
        self.with_mounted(|mounted| mounted.preview(sample))
    }

    // --- Queries ---

    /// Placed points in order.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Dom`] if the board is busy handling an event.
    pub fn outline(&self) -> Result<Vec<Point>, DrawError> {
        self.with_mounted(|mounted| Ok(mounted.core.outline().to_vec()))
    }

    /// The outline as a JSON array of `{x, y}` objects.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Json`] if encoding fails.
    pub fn outline_json(&self) -> Result<String, DrawError> {
        self.with_mounted(|mounted| mounted.core.outline_json())
    }

    /// The outline as a JS array of `[x, y]` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`DrawError::Dom`] if the board is busy handling an event.
    pub fn outline_js(&self) -> Result<js_sys::Array, DrawError> {
        Ok(self
            .outline()?
            .into_iter()
            .map(|p| js_sys::Array::of2(&p.x.into(), &p.y.into()))
            .collect())
    }

    /// Number of active DOM listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn with_mounted<T>(&self, f: impl FnOnce(&mut Mounted) -> Result<T, DrawError>) -> Result<T, DrawError> {
        let mut mounted = borrow_board(&self.mounted)?;
        f(&mut mounted)
    }
}

/// Exclusive access to board state shared with the event listeners.
///
/// Re-entrant access from inside a listener fails with [`DrawError::Dom`]
/// instead of panicking.
fn borrow_board<T>(cell: &RefCell<T>) -> Result<RefMut<'_, T>, DrawError> {
    cell.try_borrow_mut()
        .map_err(|_| DrawError::Dom("board is busy handling another event".to_string()))
}
