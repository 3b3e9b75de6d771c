//! Bounding box traits.

use crate::rect::Rect;

/// Trait for types with an optional axis-aligned bounding box.
pub trait Bbox {
    /// The smallest rectangle containing the object, if any.
    fn bbox(&self) -> Option<Rect>;
}

impl<T: Bbox> Bbox for [T] {
    fn bbox(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for item in self {
            match (result, item.bbox()) {
                (Some(acc), Some(r)) => result = Some(acc.union(r)),
                (None, r) => result = r,
                _ => (),
            }
        }
        result
    }
}

impl<T: Bbox> Bbox for Vec<T> {
    fn bbox(&self) -> Option<Rect> {
        self.as_slice().bbox()
    }
}

impl<T: Bbox> Bbox for Option<T> {
    fn bbox(&self) -> Option<Rect> {
        self.as_ref().and_then(Bbox::bbox)
    }
}
