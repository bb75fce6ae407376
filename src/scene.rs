//! Scene graph: an arena of nodes under a single pannable root layer.
//!
//! Every node carries the same capability record (transform, visibility,
//! parent/children links) plus a [`NodeKind`] tag holding the data specific
//! to that kind. Behaviour that differs between kinds (bounds, hit regions,
//! painting) dispatches on the tag.
//!
//! Three coordinate spaces are in play:
//!
//! - **local**: a node's own space, where its bounds live;
//! - **world**: the root layer's local space, where board content is laid out;
//! - **screen**: host canvas pixels. The root layer's transform maps world to screen.
//!
//! Matrices are derived from node fields on every call, so reads always see
//! the latest transforms.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use uuid::Uuid;

use crate::geom::{Affine, Point, Rect, Size};
use crate::text::{ApproxTextMeasure, TextMeasure, TextStyle};
use crate::transform::Transform;

/// Unique identifier for a scene node.
pub type NodeId = Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("node not found: {0}")]
    NotFound(NodeId),
    #[error("node {0} is not a text node")]
    NotText(NodeId),
    #[error("moving {child} under {parent} would create a cycle")]
    Cycle { child: NodeId, parent: NodeId },
    #[error("the root layer cannot be moved or removed")]
    RootImmutable,
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The root layer. Owns the pan/zoom transform.
    Layer,
    /// A text note. `size` is the measured block size in local units.
    Text { content: String, style: TextStyle, size: Size },
    /// Outline drawn around the active object, in world coordinates.
    Border { polygon: [Point; 4], stroke_width: f64, color: u32 },
    /// Semi-transparent drag rectangle of the marquee selector.
    Marquee { rect: Rect, fill: u32, alpha: f64 },
    /// Multi-selection container. Children are not individually pickable.
    Group { hit_area: Rect },
    /// Rotation handle. `target` is a lookup handle, not ownership.
    ControlPoint { target: NodeId, radius: f64, stroke_width: f64 },
}

impl NodeKind {
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Whether the hit test may report this node as a target.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Text { .. } | Self::Group { .. } | Self::ControlPoint { .. })
    }

    /// Whether the hit test descends into this node's children.
    fn hit_children(&self) -> bool {
        matches!(self, Self::Layer)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order (last is on top).
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    measurer: Box<dyn TextMeasure>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Box::new(ApproxTextMeasure))
    }
}

impl Scene {
    /// Create a scene holding only the root layer.
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasure>) -> Self {
        let root = Uuid::new_v4();
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            Node {
                id: root,
                parent: None,
                children: Vec::new(),
                transform: Transform::default(),
                visible: true,
                kind: NodeKind::Layer,
            },
        );
        Self { nodes, root, measurer }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of nodes, the root layer included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root layer is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Children of `id` in draw order; empty for unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.nodes.get(&id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.nodes.get(&id).map(|n| &n.kind)
    }

    #[must_use]
    pub fn transform(&self, id: NodeId) -> Option<Transform> {
        self.nodes.get(&id).map(|n| n.transform)
    }

    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.nodes.get(&id).is_some_and(|n| n.visible)
    }

    /// Content of a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text { content, .. } => Some(content),
            _ => None,
        }
    }

    // --- Structure ---

    /// Append a new node as the topmost child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `parent` does not exist.
    pub fn insert(&mut self, parent: NodeId, kind: NodeKind, transform: Transform) -> Result<NodeId, SceneError> {
        let id = Uuid::new_v4();
        let parent_node = self.nodes.get_mut(&parent).ok_or(SceneError::NotFound(parent))?;
        parent_node.children.push(id);
        self.nodes.insert(id, Node { id, parent: Some(parent), children: Vec::new(), transform, visible: true, kind });
        Ok(id)
    }

    /// Insert a measured text node.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `parent` does not exist.
    pub fn add_text(
        &mut self,
        parent: NodeId,
        content: impl Into<String>,
        style: TextStyle,
        position: Point,
    ) -> Result<NodeId, SceneError> {
        let content = content.into();
        let size = self.measurer.measure(&content, &style);
        self.insert(parent, NodeKind::Text { content, style, size }, Transform::at(position))
    }

    /// Remove a node and its whole subtree, returning the node itself.
    ///
    /// # Errors
    ///
    /// Returns `RootImmutable` for the root layer and `NotFound` for unknown ids.
    pub fn remove(&mut self, id: NodeId) -> Result<Node, SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        let node = self.nodes.remove(&id).ok_or(SceneError::NotFound(id))?;
        if let Some(parent) = node.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != id);
        }
        let mut stack = node.children.clone();
        while let Some(child) = stack.pop() {
            if let Some(removed) = self.nodes.remove(&child) {
                stack.extend(removed.children);
            }
        }
        Ok(node)
    }

    /// Move `id` to the top of `new_parent`'s children. The transform is kept
    /// as is; callers re-express it in the new parent's space when needed.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `RootImmutable`, or `Cycle` when `new_parent` lies
    /// inside the subtree of `id`.
    pub fn set_parent(&mut self, id: NodeId, new_parent: NodeId) -> Result<(), SceneError> {
        if id == self.root {
            return Err(SceneError::RootImmutable);
        }
        if !self.nodes.contains_key(&id) {
            return Err(SceneError::NotFound(id));
        }
        if !self.nodes.contains_key(&new_parent) {
            return Err(SceneError::NotFound(new_parent));
        }
        let mut cursor = Some(new_parent);
        while let Some(current) = cursor {
            if current == id {
                return Err(SceneError::Cycle { child: id, parent: new_parent });
            }
            cursor = self.parent(current);
        }

        if let Some(old) = self.parent(id).and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|c| *c != id);
        }
        if let Some(parent) = self.nodes.get_mut(&new_parent) {
            parent.children.push(id);
        }
        if let Some(node) = self.nodes.get_mut(&id) {
            node.parent = Some(new_parent);
        }
        Ok(())
    }

    // --- Mutation ---

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, SceneError> {
        self.nodes.get_mut(&id).ok_or(SceneError::NotFound(id))
    }

    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub fn set_transform(&mut self, id: NodeId, transform: Transform) -> Result<(), SceneError> {
        self.node_mut(id)?.transform = transform;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<(), SceneError> {
        self.node_mut(id)?.transform.position = position;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub fn set_angle(&mut self, id: NodeId, angle: f64) -> Result<(), SceneError> {
        self.node_mut(id)?.transform.angle = angle;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), SceneError> {
        self.node_mut(id)?.visible = visible;
        Ok(())
    }

    /// Replace kind-specific data, e.g. to redraw a border polygon.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids.
    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) -> Result<(), SceneError> {
        self.node_mut(id)?.kind = kind;
        Ok(())
    }

    /// Replace the string of a text node and re-measure it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown ids and `NotText` for other kinds.
    pub fn set_text(&mut self, id: NodeId, new_content: impl Into<String>) -> Result<(), SceneError> {
        let new_content = new_content.into();
        let style = match &self.node_mut(id)?.kind {
            NodeKind::Text { style, .. } => *style,
            _ => return Err(SceneError::NotText(id)),
        };
        let new_size = self.measurer.measure(&new_content, &style);
        if let NodeKind::Text { content, size, .. } = &mut self.node_mut(id)?.kind {
            *content = new_content;
            *size = new_size;
        }
        Ok(())
    }

    // --- Matrices ---

    /// Local-to-parent matrix.
    #[must_use]
    pub fn local_matrix(&self, id: NodeId) -> Option<Affine> {
        self.nodes.get(&id).map(|n| n.transform.to_affine())
    }

    /// Local-to-world matrix: the node's and its ancestors' local matrices,
    /// stopping below the root layer. Identity for the root itself.
    #[must_use]
    pub fn world_matrix(&self, id: NodeId) -> Option<Affine> {
        let mut node = self.nodes.get(&id)?;
        let mut m = Affine::IDENTITY;
        while node.id != self.root {
            m = node.transform.to_affine() * m;
            match node.parent.and_then(|p| self.nodes.get(&p)) {
                Some(parent) => node = parent,
                None => break,
            }
        }
        Some(m)
    }

    /// Local-to-screen matrix, including the root layer's pan and zoom.
    #[must_use]
    pub fn screen_matrix(&self, id: NodeId) -> Option<Affine> {
        let root = self.local_matrix(self.root)?;
        Some(root * self.world_matrix(id)?)
    }

    // --- Bounds ---

    /// Axis-aligned bounds of the node's content in its own local space.
    ///
    /// Containers report the union of their visible children's bounds mapped
    /// through each child's local matrix; an empty container reports a zero rect.
    #[must_use]
    pub fn local_bounds(&self, id: NodeId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        let bounds = match &node.kind {
            NodeKind::Layer | NodeKind::Group { .. } => node
                .children
                .iter()
                .filter_map(|c| self.nodes.get(c))
                .filter(|c| c.visible)
                .filter_map(|c| {
                    let local = self.local_bounds(c.id)?;
                    Some(c.transform.to_affine().transform_rect_bbox(local))
                })
                .reduce(|a, b| a.union(b))
                .unwrap_or(Rect::ZERO),
            NodeKind::Text { size, .. } => Rect::from_origin_size(Point::ZERO, *size),
            NodeKind::Border { polygon, .. } => polygon
                .iter()
                .skip(1)
                .fold(Rect::from_points(polygon[0], polygon[0]), |r, p| r.union_pt(*p)),
            NodeKind::Marquee { rect, .. } => *rect,
            NodeKind::ControlPoint { radius, .. } => Rect::new(-radius, -radius, *radius, *radius),
        };
        Some(bounds)
    }

    // --- Hit testing ---

    /// Topmost interactive node under a screen point, or `None` for blank canvas.
    ///
    /// Hidden nodes are skipped together with their subtrees. Group children
    /// are never reported; the group itself is.
    #[must_use]
    pub fn hit_test(&self, screen: Point) -> Option<NodeId> {
        self.hit_node(self.root, screen)
    }

    fn hit_node(&self, id: NodeId, screen: Point) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        if !node.visible {
            return None;
        }
        if node.kind.hit_children() {
            for child in node.children.iter().rev() {
                if let Some(hit) = self.hit_node(*child, screen) {
                    return Some(hit);
                }
            }
        }
        (node.kind.is_interactive() && self.contains_point(id, screen)).then_some(id)
    }

    /// Whether a screen point falls inside the node's hit region.
    #[must_use]
    pub fn contains_point(&self, id: NodeId, screen: Point) -> bool {
        let (Some(node), Some(m)) = (self.nodes.get(&id), self.screen_matrix(id)) else {
            return false;
        };
        if m.determinant() == 0.0 {
            return false;
        }
        let local = m.inverse() * screen;
        match &node.kind {
            NodeKind::Text { size, .. } => rect_contains(Rect::from_origin_size(Point::ZERO, *size), local),
            NodeKind::Group { hit_area } => rect_contains(*hit_area, local),
            NodeKind::ControlPoint { radius, .. } => local.to_vec2().length() <= *radius,
            NodeKind::Layer | NodeKind::Border { .. } | NodeKind::Marquee { .. } => false,
        }
    }

    /// All visible nodes in paint order (parents before children, bottom to top).
    #[must_use]
    pub fn draw_order(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            if !node.visible {
                continue;
            }
            out.push(id);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Inclusive point-in-rect test; points on the edge are inside.
fn rect_contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}
