//! Group container for multi-selection.
//!
//! A group temporarily adopts a set of root-layer objects so they can be
//! dragged and rotated as one. Releasing the group hands each child back to
//! the root with its transform flattened, so nothing moves on screen across
//! the transition.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use crate::geom::{Point, Rect};
use crate::scene::{NodeId, NodeKind, Scene, SceneError};
use crate::transform::Transform;

/// Handle to a live group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupContainer {
    id: NodeId,
}

impl GroupContainer {
    /// Insert an empty group as the topmost child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `parent` does not exist.
    pub fn new(scene: &mut Scene, parent: NodeId) -> Result<Self, SceneError> {
        let id = scene.insert(parent, NodeKind::Group { hit_area: Rect::ZERO }, Transform::default())?;
        Ok(Self { id })
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Current members in draw order.
    #[must_use]
    pub fn children<'a>(&self, scene: &'a Scene) -> &'a [NodeId] {
        scene.children(self.id)
    }

    /// Move the group. The next matrix read already reflects the new position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the group node is gone.
    pub fn set_position(&self, scene: &mut Scene, position: Point) -> Result<(), SceneError> {
        scene.set_position(self.id, position)
    }

    /// Reparent `objects` into the group, keeping their world position, and
    /// recompute the hit region from the combined bounds.
    ///
    /// Expects the group to be unrotated and unscaled, which holds between
    /// creation and the first gesture.
    ///
    /// # Errors
    ///
    /// Fails on the first object that cannot be reparented; objects handled
    /// before it stay adopted.
    pub fn adopt(&self, scene: &mut Scene, objects: &[NodeId]) -> Result<(), SceneError> {
        let origin = scene.transform(self.id).ok_or(SceneError::NotFound(self.id))?.position;
        for &obj in objects {
            scene.set_parent(obj, self.id)?;
            let mut t = scene.transform(obj).ok_or(SceneError::NotFound(obj))?;
            t.position = Point::new(t.position.x - origin.x, t.position.y - origin.y);
            scene.set_transform(obj, t)?;
        }
        let hit_area = scene.local_bounds(self.id).unwrap_or(Rect::ZERO);
        scene.set_kind(self.id, NodeKind::Group { hit_area })
    }

    /// Hand every child back to `root` with `group_local * child_local` as its
    /// new local transform, then delete the group node.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the group or `root` is gone.
    pub fn release(self, scene: &mut Scene, root: NodeId) -> Result<Vec<NodeId>, SceneError> {
        let group_matrix = scene.local_matrix(self.id).ok_or(SceneError::NotFound(self.id))?;
        let children = scene.children(self.id).to_vec();
        for &child in &children {
            let child_matrix = scene.local_matrix(child).ok_or(SceneError::NotFound(child))?;
            scene.set_parent(child, root)?;
            scene.set_transform(child, Transform::from_affine(group_matrix * child_matrix))?;
        }
        scene.remove(self.id)?;
        Ok(children)
    }
}
