//! Pan/zoom camera over the root layer.
//!
//! The root layer's transform is the camera: its position is the pan in screen
//! pixels and its uniform scale is the zoom. Rotation is always zero, which
//! keeps the world/screen conversions simple closed forms.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::config::BoardConfig;
use crate::geom::{Point, Vec2};
use crate::transform::Transform;

/// Camera state for pan/zoom on the infinite canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Screen position of the world origin, in pixels.
    pub pan: Point,
    /// Uniform scale factor (1.0 = no zoom).
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan: Point::ZERO, zoom: 1.0 }
    }
}

impl Camera {
    /// Read the camera off a root-layer transform.
    #[must_use]
    pub fn from_transform(t: &Transform) -> Self {
        Self { pan: t.position, zoom: t.scale.x }
    }

    /// The root-layer transform for this camera.
    #[must_use]
    pub fn to_transform(self) -> Transform {
        Transform { position: self.pan, scale: Vec2::new(self.zoom, self.zoom), angle: 0.0 }
    }

    /// Convert a screen-space point to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new((screen.x - self.pan.x) / self.zoom, (screen.y - self.pan.y) / self.zoom)
    }

    /// Convert a world-space point to screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(world.x * self.zoom + self.pan.x, world.y * self.zoom + self.pan.y)
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Pan relative to a gesture start: the pan snapshot plus the raw screen
    /// delta of the pointer. Not zoom-corrected, since it moves the frame the
    /// zoom is expressed in.
    #[must_use]
    pub fn panned(self, pan_at_down: Point, down: Point, current: Point) -> Self {
        Self { pan: pan_at_down + (current - down), ..self }
    }

    /// Zoom about a screen point so that the world point under it stays put.
    ///
    /// `old_zoom == new_zoom` gives a zero delta, so clamped wheel events at a
    /// bound leave the pan untouched.
    #[must_use]
    pub fn zoomed(self, old_zoom: f64, new_zoom: f64, pointer_screen: Point) -> Self {
        let local = self.screen_to_world(pointer_screen).to_vec2();
        Self { pan: self.pan + local * (old_zoom - new_zoom), zoom: new_zoom }
    }
}

/// Zoom after a wheel event: `old * base^dy`, clamped to the configured range.
#[must_use]
pub fn wheel_zoom(old_zoom: f64, delta_y: f64, config: &BoardConfig) -> f64 {
    (old_zoom * config.wheel_zoom_base.powf(delta_y)).clamp(config.min_zoom, config.max_zoom)
}
