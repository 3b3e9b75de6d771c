//! Rotations and reflections of layout objects.
//!
//! Photonic layouts here restrict rotations to multiples of 90 degrees so
//! that every placement maps grid points to grid points exactly.

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A counterclockwise rotation by a multiple of 90 degrees.
#[derive(
    Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub enum Rotation {
    /// No rotation.
    #[default]
    R0,
    /// 90 degrees counterclockwise.
    R90,
    /// 180 degrees.
    R180,
    /// 270 degrees counterclockwise.
    R270,
}

impl Rotation {
    /// The rotation angle in degrees, in `[0, 360)`.
    pub const fn degrees(&self) -> i64 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// Creates a rotation from an angle in degrees.
    ///
    /// Returns [`None`] if the angle is not a multiple of 90 degrees.
    pub fn from_degrees(angle: i64) -> Option<Self> {
        match angle.rem_euclid(360) {
            0 => Some(Self::R0),
            90 => Some(Self::R90),
            180 => Some(Self::R180),
            270 => Some(Self::R270),
            _ => None,
        }
    }

    /// Composes two rotations: the result rotates by `self` then by `other`.
    pub fn then(&self, other: Rotation) -> Rotation {
        Self::from_degrees(self.degrees() + other.degrees()).unwrap()
    }

    /// The rotation undoing `self`.
    pub fn inverse(&self) -> Rotation {
        Self::from_degrees(-self.degrees()).unwrap()
    }

    /// The rotation pointing in the opposite direction.
    ///
    /// Useful for port orientations: two ports mate when their outward
    /// directions are opposite.
    pub fn opposite(&self) -> Rotation {
        self.then(Rotation::R180)
    }

    /// Rotates a point about the origin.
    pub const fn apply(&self, p: Point) -> Point {
        match self {
            Self::R0 => p,
            Self::R90 => Point::new(-p.y, p.x),
            Self::R180 => Point::new(-p.x, -p.y),
            Self::R270 => Point::new(p.y, -p.x),
        }
    }

    /// The unit direction this rotation maps the +x axis to.
    pub const fn direction(&self) -> Point {
        self.apply(Point::new(1, 0))
    }
}

/// An orientation: a reflection about the x-axis followed by a rotation.
///
/// The reflect-then-rotate order matches the GDSII `STRANS` convention.
#[derive(
    Debug, Default, Copy, Clone, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord,
)]
pub struct Orientation {
    /// Whether to reflect about the x-axis before rotating.
    pub reflect_vert: bool,
    /// The rotation applied after the optional reflection.
    pub rotation: Rotation,
}

impl Orientation {
    /// Creates an orientation with the given rotation and no reflection.
    pub const fn from_rotation(rotation: Rotation) -> Self {
        Self {
            reflect_vert: false,
            rotation,
        }
    }

    /// Creates a reflected orientation with the given rotation.
    pub const fn reflected(rotation: Rotation) -> Self {
        Self {
            reflect_vert: true,
            rotation,
        }
    }

    /// Applies this orientation to a point.
    pub const fn apply(&self, p: Point) -> Point {
        let p = if self.reflect_vert {
            Point::new(p.x, -p.y)
        } else {
            p
        };
        self.rotation.apply(p)
    }

    /// Maps a rotation (e.g. a port's outward direction) through this
    /// orientation.
    pub fn apply_rotation(&self, r: Rotation) -> Rotation {
        let r = if self.reflect_vert { r.inverse() } else { r };
        r.then(self.rotation)
    }

    /// Composes two orientations: the result applies `self` first, then
    /// `other`.
    pub fn then(&self, other: Orientation) -> Orientation {
        let rotation = if other.reflect_vert {
            self.rotation.inverse()
        } else {
            self.rotation
        }
        .then(other.rotation);
        Orientation {
            reflect_vert: self.reflect_vert ^ other.reflect_vert,
            rotation,
        }
    }
}

impl From<Rotation> for Orientation {
    fn from(value: Rotation) -> Self {
        Self::from_rotation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_compose() {
        assert_eq!(Rotation::R90.then(Rotation::R270), Rotation::R0);
        assert_eq!(Rotation::R180.then(Rotation::R270), Rotation::R90);
        assert_eq!(Rotation::R90.inverse(), Rotation::R270);
        assert_eq!(Rotation::R0.opposite(), Rotation::R180);
    }

    #[test]
    fn rotations_map_points_exactly() {
        let p = Point::new(3, 4);
        assert_eq!(Rotation::R90.apply(p), Point::new(-4, 3));
        assert_eq!(Rotation::R180.apply(p), Point::new(-3, -4));
        assert_eq!(Rotation::R270.apply(p), Point::new(4, -3));
    }

    #[test]
    fn orientation_composition_matches_pointwise_application() {
        let points = [Point::new(7, -2), Point::new(0, 5), Point::new(-3, -3)];
        let orientations = [
            Orientation::from_rotation(Rotation::R0),
            Orientation::from_rotation(Rotation::R90),
            Orientation::reflected(Rotation::R0),
            Orientation::reflected(Rotation::R270),
        ];
        for a in orientations {
            for b in orientations {
                let composed = a.then(b);
                for p in points {
                    assert_eq!(composed.apply(p), b.apply(a.apply(p)));
                }
            }
        }
    }

    #[test]
    fn orientation_maps_directions() {
        let o = Orientation::reflected(Rotation::R90);
        // East reflects to east, then rotates to north.
        assert_eq!(o.apply_rotation(Rotation::R0), Rotation::R90);
        // North reflects to south, then rotates to east.
        assert_eq!(o.apply_rotation(Rotation::R90), Rotation::R0);
    }
}
