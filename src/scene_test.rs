#![allow(clippy::float_cmp)]

use super::*;
use crate::geom::Vec2;

const EPSILON: f64 = 1e-9;

fn approx_pt(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON
}

/// Style whose measured box is `chars * 6` wide and `lines * 12` tall.
fn style() -> TextStyle {
    TextStyle { font_size: 10.0, line_height: 12.0, fill: 0 }
}

fn scene_with_text(content: &str, at: Point) -> (Scene, NodeId) {
    let mut scene = Scene::default();
    let root = scene.root();
    let id = scene.add_text(root, content, style(), at).unwrap();
    (scene, id)
}

// =============================================================
// Structure
// =============================================================

#[test]
fn new_scene_has_only_root() {
    let scene = Scene::default();
    assert!(scene.is_empty());
    assert_eq!(scene.len(), 1);
    assert_eq!(scene.kind(scene.root()), Some(&NodeKind::Layer));
    assert!(scene.parent(scene.root()).is_none());
}

#[test]
fn insert_appends_on_top() {
    let mut scene = Scene::default();
    let root = scene.root();
    let a = scene.add_text(root, "a", style(), Point::ZERO).unwrap();
    let b = scene.add_text(root, "b", style(), Point::ZERO).unwrap();
    assert_eq!(scene.children(root), &[a, b]);
    assert_eq!(scene.parent(a), Some(root));
}

#[test]
fn insert_under_missing_parent_fails() {
    let mut scene = Scene::default();
    let ghost = Uuid::new_v4();
    let err = scene.insert(ghost, NodeKind::Layer, Transform::default()).unwrap_err();
    assert_eq!(err, SceneError::NotFound(ghost));
}

#[test]
fn children_of_unknown_id_is_empty() {
    let scene = Scene::default();
    assert!(scene.children(Uuid::new_v4()).is_empty());
}

#[test]
fn remove_takes_subtree() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();
    let child = scene.add_text(group, "x", style(), Point::ZERO).unwrap();

    let removed = scene.remove(group).unwrap();
    assert_eq!(removed.id(), group);
    assert!(!scene.contains(group));
    assert!(!scene.contains(child));
    assert!(scene.children(root).is_empty());
}

#[test]
fn root_cannot_be_removed_or_reparented() {
    let mut scene = Scene::default();
    let root = scene.root();
    let (_, other) = scene_with_text("x", Point::ZERO);
    assert_eq!(scene.remove(root).unwrap_err(), SceneError::RootImmutable);
    assert_eq!(scene.set_parent(root, other).unwrap_err(), SceneError::RootImmutable);
}

#[test]
fn set_parent_moves_between_containers() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();
    let text = scene.add_text(root, "x", style(), Point::ZERO).unwrap();

    scene.set_parent(text, group).unwrap();
    assert_eq!(scene.children(root), &[group]);
    assert_eq!(scene.children(group), &[text]);
    assert_eq!(scene.parent(text), Some(group));

    scene.set_parent(text, root).unwrap();
    assert_eq!(scene.children(root), &[group, text]);
    assert!(scene.children(group).is_empty());
}

#[test]
fn set_parent_rejects_cycles() {
    let mut scene = Scene::default();
    let root = scene.root();
    let outer = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();
    let inner = scene.insert(outer, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();

    assert!(matches!(scene.set_parent(outer, inner), Err(SceneError::Cycle { .. })));
    assert!(matches!(scene.set_parent(outer, outer), Err(SceneError::Cycle { .. })));
}

// =============================================================
// Text
// =============================================================

#[test]
fn add_text_measures_content() {
    let (scene, id) = scene_with_text("abc\nd", Point::new(5.0, 5.0));
    assert_eq!(scene.text(id), Some("abc\nd"));
    let bounds = scene.local_bounds(id).unwrap();
    assert!((bounds.width() - 18.0).abs() < EPSILON);
    assert_eq!(bounds.height(), 24.0);
}

#[test]
fn set_text_remeasures() {
    let (mut scene, id) = scene_with_text("a", Point::ZERO);
    scene.set_text(id, "abcdef").unwrap();
    assert_eq!(scene.text(id), Some("abcdef"));
    assert!((scene.local_bounds(id).unwrap().width() - 36.0).abs() < EPSILON);
}

#[test]
fn set_text_on_non_text_fails() {
    let mut scene = Scene::default();
    let root = scene.root();
    assert_eq!(scene.set_text(root, "x").unwrap_err(), SceneError::NotText(root));
}

// =============================================================
// Matrices
// =============================================================

#[test]
fn world_matrix_of_root_child_is_local() {
    let (mut scene, id) = scene_with_text("a", Point::new(10.0, 20.0));
    let root = scene.root();
    scene
        .set_transform(root, Transform { position: Point::new(100.0, 0.0), scale: Vec2::new(2.0, 2.0), angle: 0.0 })
        .unwrap();
    assert_eq!(scene.world_matrix(id), scene.local_matrix(id));
    assert_eq!(scene.world_matrix(root), Some(Affine::IDENTITY));
}

#[test]
fn screen_matrix_includes_root_pan_and_zoom() {
    let (mut scene, id) = scene_with_text("a", Point::new(10.0, 20.0));
    let root = scene.root();
    scene
        .set_transform(root, Transform { position: Point::new(100.0, 0.0), scale: Vec2::new(2.0, 2.0), angle: 0.0 })
        .unwrap();
    let p = scene.screen_matrix(id).unwrap() * Point::ZERO;
    assert!(approx_pt(p, Point::new(120.0, 40.0)));
}

#[test]
fn world_matrix_composes_through_groups() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::at(Point::new(50.0, 50.0))).unwrap();
    let text = scene.add_text(group, "a", style(), Point::new(5.0, 0.0)).unwrap();
    scene.set_angle(group, 90.0).unwrap();

    let p = scene.world_matrix(text).unwrap() * Point::ZERO;
    assert!(approx_pt(p, Point::new(50.0, 55.0)));
}

// =============================================================
// Bounds
// =============================================================

#[test]
fn group_bounds_union_children() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();
    scene.add_text(group, "a", style(), Point::new(0.0, 0.0)).unwrap();
    scene.add_text(group, "a", style(), Point::new(20.0, 30.0)).unwrap();

    let b = scene.local_bounds(group).unwrap();
    assert_eq!(b.x0, 0.0);
    assert_eq!(b.y0, 0.0);
    assert!((b.x1 - 26.0).abs() < EPSILON);
    assert_eq!(b.y1, 42.0);
}

#[test]
fn container_bounds_skip_hidden_children() {
    let mut scene = Scene::default();
    let root = scene.root();
    let a = scene.add_text(root, "a", style(), Point::new(0.0, 0.0)).unwrap();
    scene.add_text(root, "a", style(), Point::new(100.0, 100.0)).unwrap();
    scene.set_visible(a, false).unwrap();

    let b = scene.local_bounds(root).unwrap();
    assert_eq!(b.x0, 100.0);
}

#[test]
fn control_point_bounds_are_centered() {
    let mut scene = Scene::default();
    let root = scene.root();
    let cp = scene
        .insert(
            root,
            NodeKind::ControlPoint { target: Uuid::new_v4(), radius: 5.0, stroke_width: 2.0 },
            Transform::default(),
        )
        .unwrap();
    assert_eq!(scene.local_bounds(cp), Some(Rect::new(-5.0, -5.0, 5.0, 5.0)));
}

// =============================================================
// Hit testing
// =============================================================

#[test]
fn hit_test_blank_is_none() {
    let (scene, _) = scene_with_text("abc", Point::new(0.0, 0.0));
    assert!(scene.hit_test(Point::new(500.0, 500.0)).is_none());
}

#[test]
fn hit_test_finds_text_through_root_transform() {
    let (mut scene, id) = scene_with_text("abc", Point::new(10.0, 10.0));
    let root = scene.root();
    scene
        .set_transform(root, Transform { position: Point::new(100.0, 100.0), scale: Vec2::new(2.0, 2.0), angle: 0.0 })
        .unwrap();
    // Text occupies world (10,10)-(28,22), i.e. screen (120,120)-(156,144).
    assert_eq!(scene.hit_test(Point::new(125.0, 125.0)), Some(id));
    assert!(scene.hit_test(Point::new(15.0, 15.0)).is_none());
}

#[test]
fn hit_test_prefers_topmost() {
    let mut scene = Scene::default();
    let root = scene.root();
    scene.add_text(root, "abc", style(), Point::ZERO).unwrap();
    let top = scene.add_text(root, "abc", style(), Point::ZERO).unwrap();
    assert_eq!(scene.hit_test(Point::new(1.0, 1.0)), Some(top));
}

#[test]
fn hit_test_skips_hidden_nodes() {
    let (mut scene, id) = scene_with_text("abc", Point::ZERO);
    scene.set_visible(id, false).unwrap();
    assert!(scene.hit_test(Point::new(1.0, 1.0)).is_none());
}

#[test]
fn hit_test_respects_rotation() {
    let (mut scene, id) = scene_with_text("abcdefghij", Point::ZERO);
    // 60x12 box rotated a quarter turn now spans x in [-12, 0], y in [0, 60].
    scene.set_angle(id, 90.0).unwrap();
    assert!(scene.hit_test(Point::new(30.0, 5.0)).is_none());
    assert_eq!(scene.hit_test(Point::new(-5.0, 30.0)), Some(id));
}

#[test]
fn hit_test_reports_group_not_children() {
    let mut scene = Scene::default();
    let root = scene.root();
    let group = scene
        .insert(root, NodeKind::Group { hit_area: Rect::new(0.0, 0.0, 50.0, 50.0) }, Transform::default())
        .unwrap();
    scene.add_text(group, "abc", style(), Point::ZERO).unwrap();
    assert_eq!(scene.hit_test(Point::new(1.0, 1.0)), Some(group));
    assert_eq!(scene.hit_test(Point::new(40.0, 40.0)), Some(group));
}

#[test]
fn hit_test_ignores_border_and_marquee() {
    let mut scene = Scene::default();
    let root = scene.root();
    scene
        .insert(
            root,
            NodeKind::Marquee { rect: Rect::new(0.0, 0.0, 100.0, 100.0), fill: 0, alpha: 0.5 },
            Transform::default(),
        )
        .unwrap();
    scene
        .insert(
            root,
            NodeKind::Border { polygon: [Point::ZERO; 4], stroke_width: 3.0, color: 0 },
            Transform::default(),
        )
        .unwrap();
    assert!(scene.hit_test(Point::new(10.0, 10.0)).is_none());
}

#[test]
fn control_point_hit_region_is_a_disc() {
    let mut scene = Scene::default();
    let root = scene.root();
    let cp = scene
        .insert(
            root,
            NodeKind::ControlPoint { target: Uuid::new_v4(), radius: 5.0, stroke_width: 2.0 },
            Transform::at(Point::new(50.0, 50.0)),
        )
        .unwrap();
    assert_eq!(scene.hit_test(Point::new(53.0, 53.0)), Some(cp));
    // Inside the bounding square but outside the disc.
    assert!(scene.hit_test(Point::new(54.5, 54.5)).is_none());
}

// =============================================================
// Draw order
// =============================================================

#[test]
fn draw_order_is_depth_first_bottom_to_top() {
    let mut scene = Scene::default();
    let root = scene.root();
    let a = scene.add_text(root, "a", style(), Point::ZERO).unwrap();
    let group = scene.insert(root, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default()).unwrap();
    let b = scene.add_text(group, "b", style(), Point::ZERO).unwrap();
    let c = scene.add_text(root, "c", style(), Point::ZERO).unwrap();
    let hidden = scene.add_text(root, "h", style(), Point::ZERO).unwrap();
    scene.set_visible(hidden, false).unwrap();

    assert_eq!(scene.draw_order(), vec![root, a, group, b, c]);
}
