//! World-space quads and boxes for scene nodes.
//!
//! A node's local bounds are axis-aligned in its own space, but once rotated
//! they become an arbitrary quad in world space. The selection border follows
//! that quad so it turns with the object; marquee selection uses the quad's
//! axis-aligned box, which is rotation-agnostic and cheap to test.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::geom::{Aabb, Point};
use crate::scene::{NodeId, Scene};

/// Corners of a node's bounds in world space: `[tl, tr, br, bl]`.
///
/// The names refer to the unrotated local box; after rotation `tl` is not
/// necessarily the top-left-most point.
pub type Quad = [Point; 4];

/// Map the node's local bounds through its local-to-world matrix.
#[must_use]
pub fn world_quad(scene: &Scene, id: NodeId) -> Option<Quad> {
    let local = scene.local_bounds(id)?;
    let m = scene.world_matrix(id)?;
    Some([
        m * Point::new(local.x0, local.y0),
        m * Point::new(local.x1, local.y0),
        m * Point::new(local.x1, local.y1),
        m * Point::new(local.x0, local.y1),
    ])
}

/// Axis-aligned box around [`world_quad`].
#[must_use]
pub fn world_aabb(scene: &Scene, id: NodeId) -> Option<Aabb> {
    Aabb::from_points(&world_quad(scene, id)?)
}

/// Center of a quad, taken as the midpoint of its `tl`-`br` diagonal.
#[must_use]
pub fn quad_center(quad: &Quad) -> Point {
    quad[0].midpoint(quad[2])
}

/// Midpoint of the quad's top edge, where the rotation handle sits.
#[must_use]
pub fn top_mid(quad: &Quad) -> Point {
    quad[0].midpoint(quad[1])
}
