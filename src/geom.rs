//! Geometry helpers: point snapshots and axis-aligned boxes.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Detached copy of a point.
///
/// Gesture code keeps drag-origin snapshots that must never follow the live
/// pointer; taking them through this function makes that explicit at call sites.
#[must_use]
pub fn copy_point(p: Point) -> Point {
    Point::new(p.x, p.y)
}

/// Axis-aligned bounding box described by its top-left and bottom-right corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub tl: Point,
    pub br: Point,
}

impl Aabb {
    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut tl = *first;
        let mut br = *first;
        for p in rest {
            tl.x = tl.x.min(p.x);
            tl.y = tl.y.min(p.y);
            br.x = br.x.max(p.x);
            br.y = br.y.max(p.y);
        }
        Some(Self { tl, br })
    }

    /// Box spanned by two opposite corners given in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            tl: Point::new(a.x.min(b.x), a.y.min(b.y)),
            br: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.br.x - self.tl.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.br.y - self.tl.y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.tl.midpoint(self.br)
    }

    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.tl, self.br)
    }

    /// Non-strict overlap test; see [`aabb_overlap`].
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        aabb_overlap(self, other)
    }
}

/// Separating-axis test on two boxes. Boxes that only touch count as overlapping.
#[must_use]
pub fn aabb_overlap(a: &Aabb, b: &Aabb) -> bool {
    !(a.tl.y > b.br.y || a.tl.x > b.br.x || b.tl.y > a.br.y || b.tl.x > a.br.x)
}
