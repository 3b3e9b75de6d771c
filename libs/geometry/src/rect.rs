//! Axis-aligned rectangles.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// An axis-aligned rectangle, specified by its lower-left and upper-right
/// corners.
#[derive(
    Debug, Copy, Clone, Default, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Rect {
    /// The lower-left corner.
    p0: Point,
    /// The upper-right corner.
    p1: Point,
}

impl Rect {
    /// Creates a rectangle from all four sides.
    ///
    /// # Example
    ///
    /// ```
    /// # use geometry::prelude::*;
    /// let rect = Rect::from_sides(10, 20, 30, 40);
    /// assert_eq!(rect.width(), 20);
    /// assert_eq!(rect.height(), 20);
    /// ```
    pub fn from_sides(left: i64, bot: i64, right: i64, top: i64) -> Self {
        Self::from_corners(Point::new(left, bot), Point::new(right, top))
    }

    /// Creates a rectangle from two corner points, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            p0: Point::new(a.x.min(b.x), a.y.min(b.y)),
            p1: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a zero-area rectangle containing the given point.
    pub fn from_point(p: Point) -> Self {
        Self { p0: p, p1: p }
    }

    /// The leftmost x-coordinate.
    pub fn left(&self) -> i64 {
        self.p0.x
    }

    /// The bottommost y-coordinate.
    pub fn bot(&self) -> i64 {
        self.p0.y
    }

    /// The rightmost x-coordinate.
    pub fn right(&self) -> i64 {
        self.p1.x
    }

    /// The topmost y-coordinate.
    pub fn top(&self) -> i64 {
        self.p1.y
    }

    /// The width of the rectangle.
    pub fn width(&self) -> i64 {
        self.p1.x - self.p0.x
    }

    /// The height of the rectangle.
    pub fn height(&self) -> i64 {
        self.p1.y - self.p0.y
    }

    /// The center point, rounded down.
    pub fn center(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2, (self.p0.y + self.p1.y) / 2)
    }

    /// The smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: Rect) -> Rect {
        Self {
            p0: Point::new(self.p0.x.min(other.p0.x), self.p0.y.min(other.p0.y)),
            p1: Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y)),
        }
    }

    /// Expands the rectangle by `amount` on all four sides.
    pub fn expand_all(&self, amount: i64) -> Rect {
        Self {
            p0: Point::new(self.p0.x - amount, self.p0.y - amount),
            p1: Point::new(self.p1.x + amount, self.p1.y + amount),
        }
    }

    /// The four corners of the rectangle, counterclockwise from the
    /// lower left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.p0,
            Point::new(self.p1.x, self.p0.y),
            self.p1,
            Point::new(self.p0.x, self.p1.y),
        ]
    }
}

impl Bbox for Rect {
    fn bbox(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl TranslateMut for Rect {
    fn translate_mut(&mut self, p: Point) {
        self.p0.translate_mut(p);
        self.p1.translate_mut(p);
    }
}

impl TransformMut for Rect {
    fn transform_mut(&mut self, trans: Transformation) {
        *self = Rect::from_corners(trans.apply(self.p0), trans.apply(self.p1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::Rotation;
    use crate::transform::Transform;

    #[test]
    fn union_and_expand() {
        let a = Rect::from_sides(0, 0, 10, 10);
        let b = Rect::from_sides(5, -5, 20, 5);
        assert_eq!(a.union(b), Rect::from_sides(0, -5, 20, 10));
        assert_eq!(a.expand_all(2), Rect::from_sides(-2, -2, 12, 12));
    }

    #[test]
    fn transform_renormalizes_corners() {
        let r = Rect::from_sides(0, 0, 10, 4);
        let t = Transformation::from_offset_and_orientation(Point::zero(), Rotation::R90);
        assert_eq!(r.transform(t), Rect::from_sides(-4, 0, 0, 10));
    }
}
