//! Integer coordinate polygons.

use serde::{Deserialize, Serialize};

use crate::bbox::Bbox;
use crate::point::Point;
use crate::rect::Rect;
use crate::transform::{TransformMut, Transformation, TranslateMut};

/// A polygon, with vertices given in order.
///
/// The polygon is implicitly closed: the last vertex connects back to the
/// first.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Polygon {
    /// Vector of points that make up the polygon.
    points: Vec<Point>,
}

impl Polygon {
    /// Creates a polygon with the given vertices.
    pub fn from_verts(vec: Vec<Point>) -> Self {
        Self { points: vec }
    }

    /// The vertices of the polygon.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Bbox for Polygon {
    fn bbox(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut rect = Rect::from_point(*first);
        for p in &self.points[1..] {
            rect = rect.union(Rect::from_point(*p));
        }
        Some(rect)
    }
}

impl TranslateMut for Polygon {
    fn translate_mut(&mut self, p: Point) {
        self.points.translate_mut(p);
    }
}

impl TransformMut for Polygon {
    fn transform_mut(&mut self, trans: Transformation) {
        self.points.transform_mut(trans);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_covers_all_vertices() {
        let poly = Polygon::from_verts(vec![
            Point::new(0, 0),
            Point::new(10, -4),
            Point::new(3, 9),
        ]);
        assert_eq!(poly.bbox(), Some(Rect::from_sides(0, -4, 10, 9)));
        assert_eq!(Polygon::default().bbox(), None);
    }
}
