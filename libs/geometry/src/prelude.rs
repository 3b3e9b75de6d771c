//! A prelude exporting commonly used items.

pub use crate::arc::{annular_sector, arc_length, arc_point, arc_points, segments_for};
pub use crate::bbox::Bbox;
pub use crate::orientation::{Orientation, Rotation};
pub use crate::point::Point;
pub use crate::polygon::Polygon;
pub use crate::rect::Rect;
pub use crate::shape::Shape;
pub use crate::transform::{Transform, TransformMut, Transformation, Translate, TranslateMut};
pub use crate::wrap_angle;
