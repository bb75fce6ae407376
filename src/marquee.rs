//! Rubber-band selection.
//!
//! A marquee lives for one selector-tool drag. It draws a translucent
//! rectangle in the root layer and, on release, selects every visible text
//! note whose world box touches it.

#[cfg(test)]
#[path = "marquee_test.rs"]
mod marquee_test;

use tracing::{debug, warn};

use crate::board::Board;
use crate::bounds::world_aabb;
use crate::consts::{MARQUEE_ALPHA, MARQUEE_FILL};
use crate::geom::{Aabb, Point, copy_point};
use crate::scene::{NodeId, NodeKind, Scene};
use crate::transform::Transform;

/// An in-progress marquee drag. Corners are in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    start: Point,
    end: Point,
    node: NodeId,
}

impl Marquee {
    /// Clear the current selection and draw an empty rectangle at `start`.
    ///
    /// Returns `None` if the rectangle node could not be created.
    pub fn start(board: &mut Board, start: Point) -> Option<Self> {
        board.clear_active_object();
        let scene = board.scene_mut();
        let root = scene.root();
        let kind = marquee_kind(Aabb::from_corners(start, start));
        match scene.insert(root, kind, Transform::default()) {
            Ok(node) => {
                debug!(x = start.x, y = start.y, "marquee started");
                Some(Self { start: copy_point(start), end: copy_point(start), node })
            }
            Err(e) => {
                warn!(error = %e, "failed to create marquee rectangle");
                None
            }
        }
    }

    /// Scene node drawing the rectangle.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Normalized selection box.
    #[must_use]
    pub fn rect(&self) -> Aabb {
        Aabb::from_corners(self.start, self.end)
    }

    /// Move the free corner and redraw.
    pub fn move_to(&mut self, board: &mut Board, point: Point) {
        self.end = copy_point(point);
        if let Err(e) = board.scene_mut().set_kind(self.node, marquee_kind(self.rect())) {
            warn!(error = %e, "failed to redraw marquee rectangle");
        }
    }

    /// Remove the rectangle and select what it covers.
    ///
    /// One hit becomes the active object; several are wrapped in a new group
    /// that becomes active. Returns the matched notes.
    pub fn end(self, board: &mut Board) -> Vec<NodeId> {
        self.remove_rectangle(board.scene_mut());
        let selected = self.covered(board.scene());
        debug!(count = selected.len(), "marquee ended");
        match selected.as_slice() {
            [] => {}
            [only] => board.set_active_object(*only),
            _ => board.create_group(&selected),
        }
        selected
    }

    /// Remove the rectangle without selecting anything.
    pub fn cancel(self, board: &mut Board) {
        self.remove_rectangle(board.scene_mut());
        debug!("marquee cancelled");
    }

    /// Visible text notes directly under the root whose world box overlaps the rect.
    fn covered(&self, scene: &Scene) -> Vec<NodeId> {
        let rect = self.rect();
        scene
            .children(scene.root())
            .iter()
            .copied()
            .filter(|id| scene.is_visible(*id) && scene.kind(*id).is_some_and(NodeKind::is_text))
            .filter(|id| world_aabb(scene, *id).is_some_and(|b| b.overlaps(&rect)))
            .collect()
    }

    fn remove_rectangle(&self, scene: &mut Scene) {
        if let Err(e) = scene.remove(self.node) {
            warn!(error = %e, "failed to remove marquee rectangle");
        }
    }
}

fn marquee_kind(rect: Aabb) -> NodeKind {
    NodeKind::Marquee { rect: rect.to_rect(), fill: MARQUEE_FILL, alpha: MARQUEE_ALPHA }
}
