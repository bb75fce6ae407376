//! Interaction and transform engine for an infinite whiteboard of text notes.
//!
//! The crate owns everything between raw pointer input and drawing calls: a
//! scene graph under a pannable, zoomable root layer, hit-testing, the pointer
//! gesture state machine (pan, drag, rotate, marquee), multi-selection groups,
//! and the text-edit overlay. The host supplies text metrics through
//! [`text::TextMeasure`], draws through [`render::Painter`], and forwards
//! input to [`board::Board`], which hands back [`input::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Board controller: gesture state machine, selection, editing |
//! | [`scene`] | Node arena, matrices, bounds, and hit-testing |
//! | [`bounds`] | World-space quads and boxes of nodes |
//! | [`camera`] | Pan/zoom of the root layer and coordinate conversions |
//! | [`group`] | Multi-selection container (adopt/release) |
//! | [`marquee`] | Rubber-band selection |
//! | [`input`] | Tools, wheel deltas, gestures, and host actions |
//! | [`text`] | Text style, measurement, and the edit overlay state |
//! | [`render`] | Painter trait and scene traversal |
//! | [`transform`] | Position/scale/angle transform and its matrix |
//! | [`geom`] | Point helpers and axis-aligned boxes |
//! | [`config`] | Tunables with environment overrides |
//! | [`demo`] | Random sample content |
//! | [`consts`] | Shared numeric constants (zoom limits, colors, sizes) |

pub mod board;
pub mod bounds;
pub mod camera;
pub mod config;
pub mod consts;
pub mod demo;
pub mod geom;
pub mod group;
pub mod input;
pub mod marquee;
pub mod render;
pub mod scene;
pub mod text;
pub mod transform;
