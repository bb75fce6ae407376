//! Board controller: pointer gestures, selection, grouping, and text editing.
//!
//! The board owns the scene and drives it from host input. Every handler
//! runs to completion synchronously and returns the [`Action`]s the host may
//! want to react to. Geometry that follows other nodes (the selection border,
//! the rotation handle, the edit overlay) is re-derived in [`Board::tick`],
//! which the host calls once per frame.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use tracing::{debug, info, warn};

use crate::bounds::{quad_center, top_mid, world_aabb, world_quad};
use crate::camera::{Camera, wheel_zoom};
use crate::config::BoardConfig;
use crate::consts::BORDER_COLOR;
use crate::geom::{Aabb, Point, Size, copy_point};
use crate::group::GroupContainer;
use crate::input::{Action, Gesture, Tool, WheelDelta};
use crate::marquee::Marquee;
use crate::render::{Painter, paint};
use crate::scene::{NodeId, NodeKind, Scene, SceneError};
use crate::text::{ApproxTextMeasure, TextEditor, TextMeasure, TextStyle};
use crate::transform::Transform;

/// Callback run once the board has a viewport.
pub type ReadyCallback = Box<dyn FnOnce(&mut Board)>;

/// The selected object and the two helper nodes that decorate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveObject {
    /// Text note or group being manipulated.
    pub target: NodeId,
    /// Outline polygon node.
    pub border: NodeId,
    /// Rotation handle node.
    pub control_point: NodeId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Readiness {
    /// No usable viewport yet.
    Waiting,
    /// Sized; the ready callback fires on the next tick.
    Pending,
    Ready,
}

/// Last pointer release, for double-click detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Release {
    time_ms: u64,
    target: Option<NodeId>,
}

/// What a pointer-down landed on.
enum Pick {
    Blank,
    ControlPoint(NodeId),
    Object(NodeId),
    Inert,
}

pub struct Board {
    scene: Scene,
    config: BoardConfig,
    tool: Tool,
    gesture: Gesture,
    viewport: Size,
    readiness: Readiness,
    on_ready: Option<ReadyCallback>,
    active: Option<ActiveObject>,
    group: Option<GroupContainer>,
    editor: Option<TextEditor>,
    last_release: Option<Release>,
    actions: Vec<Action>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Board {
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::with_measurer(config, Box::new(ApproxTextMeasure))
    }

    /// Create a board whose text nodes are sized by a host measurer.
    #[must_use]
    pub fn with_measurer(config: BoardConfig, measurer: Box<dyn TextMeasure>) -> Self {
        Self {
            scene: Scene::new(measurer),
            config,
            tool: Tool::default(),
            gesture: Gesture::Idle,
            viewport: Size::ZERO,
            readiness: Readiness::Waiting,
            on_ready: None,
            active: None,
            group: None,
            editor: None,
            last_release: None,
            actions: Vec::new(),
        }
    }

    // --- Pointer input ---

    /// Start a gesture. Closes an open edit overlay first, then picks what
    /// lies under the pointer.
    pub fn pointer_down(&mut self, screen: Point) -> Vec<Action> {
        if !self.gesture.is_idle() {
            debug!(gesture = self.gesture.name(), "pointer down during gesture; aborting it");
            self.abort_gesture();
        }
        self.close_editor();

        let down_screen = copy_point(screen);
        match self.pick(screen) {
            Pick::Blank => {
                self.clear_active_object();
                self.dissolve_group();
                match self.tool {
                    Tool::Pointer => {
                        let pan_at_down = copy_point(self.camera().pan);
                        self.gesture = Gesture::PanningCanvas { down_screen, pan_at_down };
                    }
                    Tool::Selector => {
                        let start = self.screen_to_world(screen);
                        if let Some(marquee) = Marquee::start(self, start) {
                            self.gesture = Gesture::Marqueeing { marquee };
                        }
                    }
                }
            }
            Pick::ControlPoint(target) => self.begin_rotation(target, down_screen),
            Pick::Object(id) => self.begin_drag(id, down_screen),
            Pick::Inert => {}
        }
        debug!(gesture = self.gesture.name(), "pointer down");
        self.take_actions()
    }

    /// Advance the current gesture. Every state works from its pointer-down
    /// snapshot, so missed move events do not accumulate error.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<Action> {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::PanningCanvas { down_screen, pan_at_down } => {
                let camera = self.camera().panned(pan_at_down, down_screen, screen);
                self.set_camera(camera);
            }
            Gesture::DraggingObject { id, down_screen, origin } => {
                let delta = self.screen_to_world(screen) - self.screen_to_world(down_screen);
                warn_on_err(self.scene.set_position(id, origin + delta), "drag");
                self.actions.push(Action::RenderNeeded);
            }
            Gesture::Rotating { id, down_screen, start_angle, pivot } => {
                let from = self.screen_to_world(down_screen);
                let to = self.screen_to_world(screen);
                if let Some(delta) = rotation_delta(from, to, pivot) {
                    self.rotate_about(id, (start_angle + delta) % 360.0, pivot);
                    self.actions.push(Action::RenderNeeded);
                }
            }
            Gesture::Marqueeing { mut marquee } => {
                let world = self.screen_to_world(screen);
                marquee.move_to(self, world);
                self.gesture = Gesture::Marqueeing { marquee };
                self.actions.push(Action::RenderNeeded);
            }
        }
        self.take_actions()
    }

    /// Finish the gesture and feed double-click detection.
    ///
    /// Two releases on the same target less than `double_click_ms` apart
    /// open the edit overlay when that target is a visible text note. The
    /// click history is reset after a double click.
    pub fn pointer_up(&mut self, screen: Point, time_ms: u64) -> Vec<Action> {
        let gesture = std::mem::take(&mut self.gesture);
        if let Gesture::Marqueeing { marquee } = gesture {
            marquee.end(self);
        }
        if !gesture.is_idle() {
            debug!(gesture = gesture.name(), "gesture finished");
        }

        let target = self.scene.hit_test(screen);
        let double_click = self.last_release.is_some_and(|prev| {
            prev.target == target
                && time_ms >= prev.time_ms
                && time_ms - prev.time_ms < self.config.double_click_ms
        });
        if double_click {
            self.last_release = None;
            if let Some(id) = target {
                self.open_editor(id);
            }
        } else {
            self.last_release = Some(Release { time_ms, target });
        }
        self.take_actions()
    }

    /// The pointer was lost (left the window, capture revoked). Ends the
    /// gesture without selecting and forgets the last click.
    pub fn pointer_cancel(&mut self) -> Vec<Action> {
        self.abort_gesture();
        self.last_release = None;
        self.take_actions()
    }

    /// Zoom about the pointer by `wheel_zoom_base ^ delta.dy`.
    pub fn wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        let old_zoom = self.zoom();
        let new_zoom = wheel_zoom(old_zoom, delta.dy, &self.config);
        self.apply_zoom(old_zoom, new_zoom, screen)
    }

    /// Set the zoom to `new_zoom` (clamped) while keeping the world point
    /// under `pointer_screen` fixed.
    pub fn apply_zoom(&mut self, old_zoom: f64, new_zoom: f64, pointer_screen: Point) -> Vec<Action> {
        if !old_zoom.is_finite() || !new_zoom.is_finite() {
            warn!(old_zoom, new_zoom, "ignoring non-finite zoom");
            return self.take_actions();
        }
        let new_zoom = new_zoom.clamp(self.config.min_zoom, self.config.max_zoom);
        let camera = self.camera().zoomed(old_zoom, new_zoom, pointer_screen);
        self.set_camera(camera);
        debug!(zoom = new_zoom, "zoom applied");
        self.take_actions()
    }

    // --- Frame / shell ---

    /// Per-frame sync. Fires the ready callback after the first resize,
    /// then re-derives the selection decorations and the overlay matrix.
    pub fn tick(&mut self) -> Vec<Action> {
        if self.readiness == Readiness::Pending {
            self.readiness = Readiness::Ready;
            info!(width = self.viewport.width, height = self.viewport.height, "board ready");
            if let Some(callback) = self.on_ready.take() {
                callback(self);
            }
        }
        self.sync_active_visuals();
        self.sync_editor();
        self.take_actions()
    }

    /// Record the host canvas size. Non-positive or non-finite sizes are ignored.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "ignoring invalid viewport size");
            return;
        }
        self.viewport = Size::new(width, height);
        if self.readiness == Readiness::Waiting {
            self.readiness = Readiness::Pending;
        }
        debug!(width, height, "viewport resized");
    }

    /// Run `callback` once the board is sized. Runs immediately if it
    /// already is; otherwise replaces any earlier pending callback.
    pub fn on_ready(&mut self, callback: impl FnOnce(&mut Board) + 'static) {
        if self.readiness == Readiness::Ready {
            callback(self);
        } else {
            self.on_ready = Some(Box::new(callback));
        }
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.readiness == Readiness::Ready
    }

    pub fn set_tool(&mut self, tool: Tool) {
        debug!(?tool, "tool changed");
        self.tool = tool;
    }

    #[must_use]
    pub fn tool(&self) -> Tool {
        self.tool
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Pan and zoom, read off the root layer.
    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera::from_transform(&self.scene.transform(self.scene.root()).unwrap_or_default())
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.camera().zoom
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.camera().screen_to_world(screen)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.camera().world_to_screen(world)
    }

    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Add a text note to the root layer at a world position.
    ///
    /// # Errors
    ///
    /// Fails only if the scene lost its root.
    pub fn add_text(
        &mut self,
        content: impl Into<String>,
        style: TextStyle,
        position: Point,
    ) -> Result<NodeId, SceneError> {
        let root = self.scene.root();
        self.scene.add_text(root, content, style, position)
    }

    /// Paint every visible node.
    pub fn render(&self, painter: &mut dyn Painter) {
        paint(&self.scene, painter);
    }

    // --- Selection ---

    #[must_use]
    pub fn active_object(&self) -> Option<ActiveObject> {
        self.active
    }

    #[must_use]
    pub fn group(&self) -> Option<GroupContainer> {
        self.group
    }

    /// Select `id`, decorating it with a border and rotation handle.
    pub fn set_active_object(&mut self, id: NodeId) {
        if self.active.is_some_and(|a| a.target == id) {
            return;
        }
        if !self.scene.contains(id) {
            warn!(%id, "cannot select missing node");
            return;
        }
        self.clear_active_object();
        match self.attach_decorations(id) {
            Ok(active) => {
                self.active = Some(active);
                self.sync_active_visuals();
                debug!(%id, "active object set");
                self.actions.push(Action::SelectionChanged(Some(id)));
            }
            Err(e) => warn!(error = %e, %id, "failed to decorate active object"),
        }
    }

    /// Drop the selection and its decorations. No-op when nothing is selected.
    pub fn clear_active_object(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        for node in [active.border, active.control_point] {
            warn_on_err(self.scene.remove(node), "remove selection decoration");
        }
        debug!(id = %active.target, "active object cleared");
        self.actions.push(Action::SelectionChanged(None));
    }

    /// Rotate the active object to `angle` degrees about its current center.
    pub fn set_active_angle(&mut self, angle: f64) -> Vec<Action> {
        let Some(active) = self.active else {
            return self.take_actions();
        };
        if let Some(quad) = world_quad(&self.scene, active.target) {
            self.rotate_about(active.target, angle, quad_center(&quad));
            self.sync_active_visuals();
            self.actions.push(Action::RenderNeeded);
        }
        self.take_actions()
    }

    /// Wrap `objects` in a new group placed at their combined top-left and
    /// make the group active. Any existing group is dissolved first.
    pub fn create_group(&mut self, objects: &[NodeId]) {
        self.clear_active_object();
        self.dissolve_group();
        let corners: Vec<Point> = objects
            .iter()
            .filter_map(|id| world_aabb(&self.scene, *id))
            .flat_map(|b| [b.tl, b.br])
            .collect();
        let Some(bounds) = Aabb::from_points(&corners) else {
            return;
        };
        let root = self.scene.root();
        let group = match GroupContainer::new(&mut self.scene, root) {
            Ok(group) => group,
            Err(e) => {
                warn!(error = %e, "failed to create group");
                return;
            }
        };
        let adopted = group
            .set_position(&mut self.scene, bounds.tl)
            .and_then(|()| group.adopt(&mut self.scene, objects));
        if let Err(e) = adopted {
            warn!(error = %e, "failed to group selection");
            warn_on_err(group.release(&mut self.scene, root), "undo partial group");
            return;
        }
        self.group = Some(group);
        info!(id = %group.id(), count = objects.len(), "group created");
        self.set_active_object(group.id());
    }

    /// Release the current group's members back to the root, keeping them
    /// where they appear on screen. No-op without a group.
    pub fn dissolve_group(&mut self) {
        let Some(group) = self.group.take() else {
            return;
        };
        if self.active.is_some_and(|a| a.target == group.id()) {
            self.clear_active_object();
        }
        let root = self.scene.root();
        match group.release(&mut self.scene, root) {
            Ok(children) => info!(id = %group.id(), count = children.len(), "group dissolved"),
            Err(e) => warn!(error = %e, id = %group.id(), "failed to dissolve group"),
        }
    }

    // --- Text editing ---

    #[must_use]
    pub fn text_editor(&self) -> Option<&TextEditor> {
        self.editor.as_ref()
    }

    /// Open the overlay on a text note, replacing any overlay on another note.
    pub fn open_text_editor(&mut self, id: NodeId) -> Vec<Action> {
        self.open_editor(id);
        self.take_actions()
    }

    /// Commit and close the overlay, showing the note again.
    pub fn close_text_editor(&mut self) -> Vec<Action> {
        self.close_editor();
        self.take_actions()
    }

    /// Write overlay input back to the edited note, re-measuring it.
    pub fn edit_text(&mut self, content: impl Into<String>) -> Vec<Action> {
        let content = content.into();
        if let Some(editor) = self.editor.as_mut() {
            let id = editor.target();
            match self.scene.set_text(id, content.clone()) {
                Ok(()) => {
                    editor.set_content(content.clone());
                    self.actions.push(Action::TextChanged { id, text: content });
                }
                Err(e) => warn!(error = %e, %id, "failed to update edited text"),
            }
        }
        self.take_actions()
    }

    // --- Internals ---

    fn take_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    fn pick(&self, screen: Point) -> Pick {
        let Some(hit) = self.scene.hit_test(screen) else {
            return Pick::Blank;
        };
        match self.scene.kind(hit) {
            Some(NodeKind::ControlPoint { target, .. }) => Pick::ControlPoint(*target),
            Some(NodeKind::Text { .. } | NodeKind::Group { .. }) => Pick::Object(hit),
            _ => Pick::Inert,
        }
    }

    fn begin_rotation(&mut self, target: NodeId, down_screen: Point) {
        if self.active.is_none_or(|a| a.target != target) {
            debug!(%target, "control point without matching selection");
            return;
        }
        let (Some(t), Some(quad)) = (self.scene.transform(target), world_quad(&self.scene, target)) else {
            return;
        };
        self.gesture =
            Gesture::Rotating { id: target, down_screen, start_angle: t.angle, pivot: quad_center(&quad) };
    }

    fn begin_drag(&mut self, id: NodeId, down_screen: Point) {
        if self.active.is_none_or(|a| a.target != id) {
            self.clear_active_object();
            if self.group.is_some_and(|g| g.id() != id) {
                self.dissolve_group();
            }
            self.set_active_object(id);
        }
        let Some(t) = self.scene.transform(id) else {
            return;
        };
        self.gesture = Gesture::DraggingObject { id, down_screen, origin: copy_point(t.position) };
    }

    fn abort_gesture(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if let Gesture::Marqueeing { marquee } = gesture {
            marquee.cancel(self);
        }
        if !gesture.is_idle() {
            debug!(gesture = gesture.name(), "gesture aborted");
        }
    }

    fn set_camera(&mut self, camera: Camera) {
        let root = self.scene.root();
        warn_on_err(self.scene.set_transform(root, camera.to_transform()), "camera update");
        self.actions.push(Action::ViewChanged(camera));
    }

    /// Set the angle, then shift the node so its world center returns to `pivot`.
    fn rotate_about(&mut self, id: NodeId, angle: f64, pivot: Point) {
        warn_on_err(self.scene.set_angle(id, angle), "rotate");
        let (Some(quad), Some(t)) = (world_quad(&self.scene, id), self.scene.transform(id)) else {
            return;
        };
        let drift = quad_center(&quad) - pivot;
        warn_on_err(self.scene.set_position(id, t.position - drift), "recenter after rotate");
    }

    fn attach_decorations(&mut self, target: NodeId) -> Result<ActiveObject, SceneError> {
        let root = self.scene.root();
        let border = self.scene.insert(
            root,
            NodeKind::Border { polygon: [Point::ZERO; 4], stroke_width: 0.0, color: BORDER_COLOR },
            Transform::default(),
        )?;
        let control_point = self.scene.insert(
            root,
            NodeKind::ControlPoint { target, radius: 0.0, stroke_width: 0.0 },
            Transform::default(),
        )?;
        Ok(ActiveObject { target, border, control_point })
    }

    /// Redraw the border around the active object's world quad and park the
    /// handle on its top edge, both sized to stay constant on screen.
    fn sync_active_visuals(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        let Some(quad) = world_quad(&self.scene, active.target) else {
            debug!(id = %active.target, "active object vanished");
            self.clear_active_object();
            return;
        };
        let camera = self.camera();
        let border = NodeKind::Border {
            polygon: quad,
            stroke_width: camera.screen_dist_to_world(self.config.border_width_px),
            color: BORDER_COLOR,
        };
        let handle = NodeKind::ControlPoint {
            target: active.target,
            radius: camera.screen_dist_to_world(self.config.control_point_radius_px),
            stroke_width: camera.screen_dist_to_world(self.config.control_point_stroke_px),
        };
        warn_on_err(self.scene.set_kind(active.border, border), "border sync");
        warn_on_err(self.scene.set_kind(active.control_point, handle), "control point sync");
        warn_on_err(self.scene.set_position(active.control_point, top_mid(&quad)), "control point sync");
    }

    fn open_editor(&mut self, id: NodeId) {
        if self.editor.as_ref().is_some_and(|e| e.target() == id) {
            return;
        }
        let Some(NodeKind::Text { content, style, .. }) = self.scene.kind(id) else {
            debug!(%id, "double click on non-text node");
            return;
        };
        let (content, style) = (content.clone(), *style);
        if !self.scene.is_visible(id) {
            return;
        }
        let Some(matrix) = self.scene.screen_matrix(id) else {
            return;
        };
        self.close_editor();
        warn_on_err(self.scene.set_visible(id, false), "hide edited text");
        self.editor = Some(TextEditor::new(id, content, style, matrix));
        info!(%id, "text editor opened");
        self.actions.push(Action::EditorOpened(id));
    }

    fn close_editor(&mut self) {
        let Some(editor) = self.editor.take() else {
            return;
        };
        let id = editor.target();
        if self.scene.contains(id) {
            warn_on_err(self.scene.set_visible(id, true), "show edited text");
        }
        info!(%id, "text editor closed");
        self.actions.push(Action::EditorClosed { id, text: editor.content().to_owned() });
    }

    fn sync_editor(&mut self) {
        let Some(target) = self.editor.as_ref().map(TextEditor::target) else {
            return;
        };
        match self.scene.screen_matrix(target) {
            Some(matrix) => {
                if let Some(editor) = self.editor.as_mut() {
                    editor.set_transform(matrix);
                }
            }
            None => {
                debug!(%target, "edited text vanished");
                self.close_editor();
            }
        }
    }
}

/// Signed angle in degrees swept from `down` to `current` around `pivot`.
///
/// Positive is clockwise on a y-down screen. `None` when either point sits
/// on the pivot, where the angle is undefined.
#[must_use]
pub fn rotation_delta(down: Point, current: Point, pivot: Point) -> Option<f64> {
    let v1 = down - pivot;
    let v2 = current - pivot;
    let norms = v1.length() * v2.length();
    if norms == 0.0 || !norms.is_finite() {
        return None;
    }
    let cos = (v1.dot(v2) / norms).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    Some(if v2.cross(v1) > 0.0 { -angle } else { angle })
}

fn warn_on_err<T>(result: Result<T, SceneError>, context: &'static str) {
    if let Err(e) = result {
        warn!(error = %e, context, "scene update failed");
    }
}
