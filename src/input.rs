//! Input model: tools, wheel deltas, the gesture state machine, and the
//! actions handed back to the host.
//!
//! `Gesture` is the active gesture tracked between pointer-down and
//! pointer-up. Each variant carries the snapshots taken at pointer-down, so
//! every pointer-move recomputes its effect from the gesture start rather than
//! accumulating per-event deltas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::geom::Point;
use crate::marquee::Marquee;
use crate::scene::NodeId;

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Dragging blank canvas pans the view (default).
    #[default]
    Pointer,
    /// Dragging blank canvas draws a marquee.
    Selector,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// State of the pointer gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// Blank canvas was pressed with the pointer tool.
    PanningCanvas {
        /// Screen position of the pointer-down.
        down_screen: Point,
        /// Root-layer pan at pointer-down.
        pan_at_down: Point,
    },
    /// An object or group is being moved.
    DraggingObject {
        id: NodeId,
        /// Screen position of the pointer-down.
        down_screen: Point,
        /// Local position of the object at pointer-down.
        origin: Point,
    },
    /// The active object is being turned by its control point.
    Rotating {
        id: NodeId,
        /// Screen position of the pointer-down.
        down_screen: Point,
        /// Object angle in degrees at pointer-down.
        start_angle: f64,
        /// World-space center of the object at pointer-down; fixed for the whole gesture.
        pivot: Point,
    },
    /// Blank canvas was pressed with the selector tool.
    Marqueeing { marquee: Marquee },
}

impl Default for Gesture {
    fn default() -> Self {
        Self::Idle
    }
}

impl Gesture {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PanningCanvas { .. } => "panning_canvas",
            Self::DraggingObject { .. } => "dragging_object",
            Self::Rotating { .. } => "rotating",
            Self::Marqueeing { .. } => "marqueeing",
        }
    }
}

/// Effects the host may need to act on, returned from input handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The active object changed; `None` when the selection was cleared.
    SelectionChanged(Option<NodeId>),
    /// The text-edit overlay opened for this text node.
    EditorOpened(NodeId),
    /// The overlay closed; `text` is the committed content.
    EditorClosed { id: NodeId, text: String },
    /// Overlay input was written back to the text node.
    TextChanged { id: NodeId, text: String },
    /// The root layer was panned or zoomed.
    ViewChanged(Camera),
    /// Scene content moved and should be redrawn.
    RenderNeeded,
}
