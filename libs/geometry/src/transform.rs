//! Exact transformations of layout objects.
//!
//! A [`Transformation`] composes an [`Orientation`] with a translation.
//! Because rotations are restricted to multiples of 90 degrees, applying a
//! transformation never rounds: grid points map to grid points.

use serde::{Deserialize, Serialize};

use crate::orientation::{Orientation, Rotation};
use crate::point::Point;

/// An orientation followed by a translation.
#[derive(
    Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Transformation {
    /// The orientation applied first.
    pub orientation: Orientation,
    /// The translation applied after orienting.
    pub offset: Point,
}

impl Transformation {
    /// The identity transformation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transformation from an offset and an orientation.
    pub fn from_offset_and_orientation(offset: Point, orientation: impl Into<Orientation>) -> Self {
        Self {
            orientation: orientation.into(),
            offset,
        }
    }

    /// Creates a pure translation.
    pub fn translate(x: i64, y: i64) -> Self {
        Self {
            orientation: Orientation::default(),
            offset: Point::new(x, y),
        }
    }

    /// Applies this transformation to a point.
    pub fn apply(&self, p: Point) -> Point {
        self.orientation.apply(p) + self.offset
    }

    /// Maps a rotation through this transformation's orientation.
    pub fn apply_rotation(&self, r: Rotation) -> Rotation {
        self.orientation.apply_rotation(r)
    }

    /// Composes two transformations: the result applies `self` first, then
    /// `other`.
    pub fn then(&self, other: Transformation) -> Transformation {
        Transformation {
            orientation: self.orientation.then(other.orientation),
            offset: other.apply(self.offset),
        }
    }
}

/// Trait for objects that can be translated in place.
pub trait TranslateMut {
    /// Translates the object by the given displacement.
    fn translate_mut(&mut self, p: Point);
}

/// Trait for objects that can be translated by value.
pub trait Translate: TranslateMut + Sized {
    /// Translates the object by the given displacement, returning it.
    fn translate(mut self, p: Point) -> Self {
        self.translate_mut(p);
        self
    }
}

impl<T: TranslateMut + Sized> Translate for T {}

/// Trait for objects that can be transformed in place.
pub trait TransformMut {
    /// Transforms the object by the given transformation.
    fn transform_mut(&mut self, trans: Transformation);
}

/// Trait for objects that can be transformed by value.
pub trait Transform: TransformMut + Sized {
    /// Transforms the object by the given transformation, returning it.
    fn transform(mut self, trans: Transformation) -> Self {
        self.transform_mut(trans);
        self
    }
}

impl<T: TransformMut + Sized> Transform for T {}

impl TranslateMut for Point {
    fn translate_mut(&mut self, p: Point) {
        *self += p;
    }
}

impl TransformMut for Point {
    fn transform_mut(&mut self, trans: Transformation) {
        *self = trans.apply(*self);
    }
}

impl<T: TranslateMut> TranslateMut for Vec<T> {
    fn translate_mut(&mut self, p: Point) {
        for item in self.iter_mut() {
            item.translate_mut(p);
        }
    }
}

impl<T: TransformMut> TransformMut for Vec<T> {
    fn transform_mut(&mut self, trans: Transformation) {
        for item in self.iter_mut() {
            item.transform_mut(trans);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transformations_cascade() {
        let a = Transformation::from_offset_and_orientation(Point::new(10, 0), Rotation::R90);
        let b = Transformation::from_offset_and_orientation(Point::new(0, -5), Rotation::R180);
        let ab = a.then(b);
        for p in [Point::zero(), Point::new(3, 7), Point::new(-2, 4)] {
            assert_eq!(ab.apply(p), b.apply(a.apply(p)));
        }
    }

    #[test]
    fn identity_is_neutral() {
        let t = Transformation::from_offset_and_orientation(Point::new(1, 2), Rotation::R270);
        assert_eq!(t.then(Transformation::identity()), t);
        assert_eq!(Transformation::identity().then(t), t);
    }
}
