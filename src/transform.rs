//! Per-node transform: position, scale, and angle in degrees.
//!
//! The local-to-parent matrix is `translate(position) * rotate(angle) * scale`,
//! so a node rotates and scales about its own local origin. Matrices are built
//! on demand from these fields and never cached; a setter is visible to the
//! very next matrix read.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use serde::{Deserialize, Serialize};

use crate::geom::{Affine, Point, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Point,
    pub scale: Vec2,
    /// Clockwise rotation in degrees (y axis points down).
    pub angle: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self { position: Point::ZERO, scale: Vec2::new(1.0, 1.0), angle: 0.0 }
    }
}

impl Transform {
    #[must_use]
    pub fn at(position: Point) -> Self {
        Self { position, ..Self::default() }
    }

    /// Local-to-parent matrix.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.angle.to_radians())
            * Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }

    /// Decompose a skew-free matrix back into position, scale, and angle.
    ///
    /// Products of rotations, translations, and uniform scales are always
    /// skew-free, which covers every matrix the board composes.
    #[must_use]
    pub fn from_affine(m: Affine) -> Self {
        let [a, b, c, d, e, f] = m.as_coeffs();
        let sx = a.hypot(b);
        let (angle, sy) = if sx > 0.0 {
            (b.atan2(a).to_degrees(), (a * d - b * c) / sx)
        } else {
            // Degenerate x axis: take the rotation from the y column instead.
            ((-c).atan2(d).to_degrees(), c.hypot(d))
        };
        Self { position: Point::new(e, f), scale: Vec2::new(sx, sy), angle }
    }
}
