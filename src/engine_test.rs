#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use crate::config::{SnapConfig, ViewBox};

// =============================================================
// Helpers
// =============================================================

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn at(x: f64, y: f64) -> PointerSample {
    PointerSample::pointer(x, y)
}

fn snapping_core() -> EngineCore {
    EngineCore::new(BoardConfig { snap: SnapConfig::with_step(22.5), ..BoardConfig::default() }).unwrap()
}

fn segment_of(core: &EngineCore) -> Option<Segment> {
    core.preview().and_then(|p| p.segment)
}

fn highlighted_count(core: &EngineCore) -> usize {
    core.markers()
        .iter()
        .filter(|m| m.highlight == Highlight::Reference)
        .count()
}

// =============================================================
// Construction
// =============================================================

#[test]
fn core_default_is_idle_and_empty() {
    let core = EngineCore::default();
    assert_eq!(core.state, PreviewState::Idle);
    assert!(core.outline().is_empty());
    assert!(core.reference().is_none());
    assert!(core.preview().is_none());
    assert!(!core.snapping());
    assert_eq!(core.transform, SurfaceTransform::IDENTITY);
}

#[test]
fn core_new_enables_snapping_from_config() {
    assert!(snapping_core().snapping());
}

#[test]
fn core_new_rejects_invalid_config() {
    let config = BoardConfig { marker_radius: 0.0, ..BoardConfig::default() };
    assert!(matches!(EngineCore::new(config), Err(DrawError::Config(_))));
}

// =============================================================
// place_at
// =============================================================

#[test]
fn place_first_marker() {
    let mut core = EngineCore::default();
    let actions = core.place_at(at(10.0, 10.0)).unwrap();

    assert_eq!(core.outline(), &[pt(10.0, 10.0)]);
    assert!(core.state.is_anchored());
    let reference = core.reference().unwrap();
    assert_eq!(reference.center, pt(10.0, 10.0));
    assert_eq!(reference.highlight, Highlight::Reference);

    assert_eq!(
        actions,
        vec![
            Action::MarkerPlaced { id: reference.id, center: pt(10.0, 10.0), radius: 10.0 },
            Action::OutlineAppended(pt(10.0, 10.0)),
            Action::PreviewReset { anchor: pt(10.0, 10.0) },
            Action::PreviewMoved(Preview {
                cursor: pt(10.0, 10.0),
                segment: Some(Segment::collapsed(pt(10.0, 10.0))),
            }),
        ]
    );
}

#[test]
fn first_placement_moves_cursor_to_anchor() {
    let mut core = EngineCore::default();
    let actions = core.place_at(at(4.0, 6.0)).unwrap();
    let moved: Vec<&Action> = actions.iter().filter(|a| matches!(a, Action::PreviewMoved(_))).collect();
    assert_eq!(moved.len(), 1);
    assert!(matches!(moved[0], Action::PreviewMoved(p) if p.cursor == pt(4.0, 6.0)));
    assert_eq!(core.preview().unwrap().cursor, pt(4.0, 6.0));
}

#[test]
fn placement_after_move_keeps_dom_cursor() {
    let mut core = EngineCore::default();
    core.preview_at(at(30.0, 30.0));
    let actions = core.place_at(at(4.0, 6.0)).unwrap();
    assert!(!actions.iter().any(|a| matches!(a, Action::PreviewMoved(_))));
    assert_eq!(core.preview().unwrap().cursor, pt(30.0, 30.0));

    let actions = core.place_at(at(8.0, 6.0)).unwrap();
    assert!(!actions.iter().any(|a| matches!(a, Action::PreviewMoved(_))));
}

#[test]
fn place_second_marker_dehighlights_first() {
    let mut core = EngineCore::default();
    core.place_at(at(0.0, 0.0)).unwrap();
    let first = core.reference().unwrap().id;
    let actions = core.place_at(at(10.0, 0.0)).unwrap();
    let second = core.reference().unwrap().id;

    assert_ne!(first, second);
    assert_eq!(core.outline(), &[pt(0.0, 0.0), pt(10.0, 0.0)]);
    assert_eq!(core.scene.marker(&first).unwrap().highlight, Highlight::Default);
    assert_eq!(actions[0], Action::HighlightChanged { id: first, highlight: Highlight::Default });
    assert!(matches!(actions[1], Action::MarkerPlaced { id, .. } if id == second));
    assert_eq!(highlighted_count(&core), 1);
}

#[test]
fn outline_matches_every_placement_in_order() {
    let mut core = EngineCore::default();
    let positions: Vec<Point> = (0..25).map(|i| pt(f64::from(i) * 1.5, f64::from(i % 4) - 2.0)).collect();
    for p in &positions {
        core.place_at(at(p.x, p.y)).unwrap();
        assert_eq!(highlighted_count(&core), 1);
    }
    assert_eq!(core.outline().len(), positions.len());
    assert_eq!(core.outline(), positions.as_slice());
}

#[test]
fn place_resets_preview_segment_to_zero_length() {
    let mut core = EngineCore::default();
    core.place_at(at(0.0, 0.0)).unwrap();
    core.preview_at(at(50.0, 0.0));
    core.place_at(at(20.0, 20.0)).unwrap();

    let segment = segment_of(&core).unwrap();
    assert_eq!(segment, Segment::collapsed(pt(20.0, 20.0)));
    // Cursor stays where the pointer last was.
    assert_eq!(core.preview().unwrap().cursor, pt(50.0, 0.0));
}

#[test]
fn place_maps_through_transform() {
    let mut core = EngineCore::default();
    core.set_transform(SurfaceTransform::new(2.0, 2.0, 10.0, 20.0));
    core.place_at(at(30.0, 40.0)).unwrap();
    assert_eq!(core.outline(), &[pt(10.0, 10.0)]);
}

#[test]
fn place_with_degenerate_transform_maps_as_identity() {
    let mut core = EngineCore::default();
    core.set_transform(SurfaceTransform::new(0.0, 1.0, 5.0, 5.0));
    core.place_at(at(7.0, 8.0)).unwrap();
    assert_eq!(core.outline(), &[pt(7.0, 8.0)]);
}

#[test]
fn place_uses_configured_radius() {
    let mut core = EngineCore::new(BoardConfig { marker_radius: 3.5, ..BoardConfig::default() }).unwrap();
    core.place_at(at(1.0, 1.0)).unwrap();
    assert_eq!(core.reference().unwrap().radius, 3.5);
}

#[test]
fn touch_and_pointer_place_identically() {
    let mut mouse = EngineCore::default();
    let mut touch = EngineCore::default();
    mouse.place_at(PointerSample::pointer(4.0, 9.0)).unwrap();
    touch.place_at(PointerSample::touch(4.0, 9.0)).unwrap();
    assert_eq!(mouse.outline(), touch.outline());
}

// =============================================================
// preview_at
// =============================================================

#[test]
fn idle_preview_moves_cursor_only() {
    let mut core = EngineCore::default();
    let actions = core.preview_at(at(5.0, 5.0));
    assert_eq!(actions, vec![Action::PreviewMoved(Preview { cursor: pt(5.0, 5.0), segment: None })]);
    assert!(core.outline().is_empty());
    assert_eq!(core.state, PreviewState::Idle);
}

#[test]
fn anchored_preview_draws_segment_from_reference() {
    let mut core = EngineCore::default();
    core.place_at(at(10.0, 10.0)).unwrap();
    core.preview_at(at(20.0, 10.0));

    let preview = core.preview().unwrap();
    assert_eq!(preview.cursor, pt(20.0, 10.0));
    assert_eq!(preview.segment, Some(Segment { from: pt(10.0, 10.0), to: pt(20.0, 10.0) }));
}

#[test]
fn preview_never_grows_outline() {
    let mut core = EngineCore::default();
    core.place_at(at(0.0, 0.0)).unwrap();
    for i in 0..10 {
        core.preview_at(at(f64::from(i), 3.0));
    }
    assert_eq!(core.outline().len(), 1);
}

#[test]
fn preview_is_idempotent() {
    let mut core = snapping_core();
    core.place_at(at(3.0, 3.0)).unwrap();
    let first = core.preview_at(at(17.0, 29.0));
    let state_after_first = core.preview();
    let second = core.preview_at(at(17.0, 29.0));
    assert_eq!(first, second);
    assert_eq!(core.preview(), state_after_first);
}

#[test]
fn unsnapped_preview_follows_pointer_exactly() {
    let mut core = EngineCore::default();
    core.place_at(at(10.0, 10.0)).unwrap();
    core.preview_at(at(20.0, 11.0));
    assert_eq!(core.preview().unwrap().cursor, pt(20.0, 11.0));
}

#[test]
fn snapped_preview_rounds_to_horizontal() {
    let mut core = snapping_core();
    core.place_at(at(10.0, 10.0)).unwrap();
    core.preview_at(at(20.0, 11.0));

    let preview = core.preview().unwrap();
    assert!(approx_eq(preview.cursor.y, 10.0));
    assert!(approx_eq(preview.cursor.x, 10.0 + 101.0_f64.sqrt()));
    let segment = preview.segment.unwrap();
    assert_eq!(segment.from, pt(10.0, 10.0));
    assert_eq!(segment.to, preview.cursor);
}

#[test]
fn snapping_is_skipped_while_idle() {
    let mut core = snapping_core();
    core.preview_at(at(20.0, 11.0));
    assert_eq!(core.preview().unwrap().cursor, pt(20.0, 11.0));
}

#[test]
fn snapped_zero_distance_preview_stays_on_reference() {
    let mut core = snapping_core();
    core.place_at(at(8.0, 8.0)).unwrap();
    core.preview_at(at(8.0, 8.0));
    let preview = core.preview().unwrap();
    assert_eq!(preview.cursor, pt(8.0, 8.0));
    assert_eq!(preview.segment, Some(Segment::collapsed(pt(8.0, 8.0))));
}

#[test]
fn snapped_preview_anchors_on_latest_reference() {
    let mut core = snapping_core();
    core.place_at(at(0.0, 0.0)).unwrap();
    core.place_at(at(100.0, 0.0)).unwrap();
    core.preview_at(at(101.0, 40.0));

    let preview = core.preview().unwrap();
    assert_eq!(preview.segment.unwrap().from, pt(100.0, 0.0));
    // ~88.6 degrees from (100, 0) snaps straight down.
    assert!(approx_eq(preview.cursor.x, 100.0));
    assert!(approx_eq(preview.cursor.y, 1601.0_f64.sqrt()));
}

// =============================================================
// Transform / view box
// =============================================================

#[test]
fn fit_view_box_without_config_is_identity() {
    let mut core = EngineCore::default();
    core.set_transform(SurfaceTransform::new(3.0, 3.0, 1.0, 1.0));
    core.fit_view_box(640.0, 480.0);
    assert_eq!(core.transform, SurfaceTransform::IDENTITY);
}

#[test]
fn fit_view_box_scales_device_input() {
    let config = BoardConfig {
        view_box: Some(ViewBox { min_x: 0.0, min_y: 0.0, width: 1000.0, height: 1000.0 }),
        ..BoardConfig::default()
    };
    let mut core = EngineCore::new(config).unwrap();
    core.fit_view_box(500.0, 800.0);
    core.place_at(at(250.0, 100.0)).unwrap();
    assert!(point_approx_eq(core.outline()[0], pt(500.0, 200.0)));
}

// =============================================================
// Queries
// =============================================================

#[test]
fn outline_json_lists_points() {
    let mut core = EngineCore::default();
    core.place_at(at(0.0, 0.0)).unwrap();
    core.place_at(at(10.0, 0.5)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&core.outline_json().unwrap()).unwrap();
    assert_eq!(json, serde_json::json!([{ "x": 0.0, "y": 0.0 }, { "x": 10.0, "y": 0.5 }]));
}

#[test]
fn outline_json_empty() {
    assert_eq!(EngineCore::default().outline_json().unwrap(), "[]");
}

#[test]
fn action_clone_and_eq() {
    let a = Action::OutlineAppended(pt(1.0, 2.0));
    assert_eq!(a.clone(), a);
}

// =============================================================
// Shared board access
// =============================================================

#[test]
fn borrow_board_grants_free_cell() {
    let cell = RefCell::new(1);
    *borrow_board(&cell).unwrap() += 1;
    assert_eq!(*cell.borrow(), 2);
}

#[test]
fn borrow_board_reports_busy_cell() {
    let cell = RefCell::new(0);
    let _held = cell.borrow();
    assert!(matches!(borrow_board(&cell), Err(DrawError::Dom(msg)) if msg.contains("busy")));
}
