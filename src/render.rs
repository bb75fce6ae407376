//! Rendering: walks the scene and hands each visible node to a [`Painter`].
//!
//! This module never mutates board state. Drawing primitives belong to the
//! host; every call receives the node's local-to-screen matrix together with
//! geometry in the node's local space, so a painter only has to apply the
//! matrix and draw.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{CONTROL_POINT_FILL, CONTROL_POINT_STROKE};
use crate::geom::{Affine, Point, Rect};
use crate::scene::{NodeKind, Scene};
use crate::text::TextStyle;

/// Host drawing backend.
pub trait Painter {
    /// Closed outline through `points`. `width` is in local units.
    fn stroke_polygon(&mut self, transform: Affine, points: &[Point], width: f64, color: u32);

    /// Filled rectangle with opacity `alpha` in `[0, 1]`.
    fn fill_rect(&mut self, transform: Affine, rect: Rect, color: u32, alpha: f64);

    /// Filled and stroked circle centered on the local origin.
    fn circle(&mut self, transform: Affine, radius: f64, stroke_width: f64, stroke: u32, fill: u32);

    /// Text block whose top-left is the local origin.
    fn text(&mut self, transform: Affine, content: &str, style: &TextStyle);
}

/// Draw the scene bottom to top. Layers and groups draw nothing themselves.
pub fn paint(scene: &Scene, painter: &mut dyn Painter) {
    for id in scene.draw_order() {
        let (Some(node), Some(m)) = (scene.get(id), scene.screen_matrix(id)) else {
            continue;
        };
        match &node.kind {
            NodeKind::Layer | NodeKind::Group { .. } => {}
            NodeKind::Text { content, style, .. } => painter.text(m, content, style),
            NodeKind::Border { polygon, stroke_width, color } => {
                painter.stroke_polygon(m, polygon, *stroke_width, *color);
            }
            NodeKind::Marquee { rect, fill, alpha } => painter.fill_rect(m, *rect, *fill, *alpha),
            NodeKind::ControlPoint { radius, stroke_width, .. } => {
                painter.circle(m, *radius, *stroke_width, CONTROL_POINT_STROKE, CONTROL_POINT_FILL);
            }
        }
    }
}
