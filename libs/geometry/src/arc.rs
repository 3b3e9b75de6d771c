//! Circular arc sampling.
//!
//! Waveguide bends, rings and spirals are drawn as polygons sampled along
//! circular arcs. Samples at angles that are multiples of 90 degrees land
//! exactly on the grid, so arc endpoints used as ports never round.

use crate::point::Point;
use crate::polygon::Polygon;

/// A point on the circle of the given radius about `center`, at the given
/// angle in degrees counterclockwise from the +x axis.
///
/// Angles that are multiples of 90 degrees produce exact results.
pub fn arc_point(center: Point, radius: i64, angle_deg: f64) -> Point {
    let wrapped = crate::wrap_angle(angle_deg);
    if wrapped == wrapped.trunc() && (wrapped as i64) % 90 == 0 {
        let (dx, dy) = match (wrapped as i64) / 90 {
            0 => (radius, 0),
            1 => (0, radius),
            2 => (-radius, 0),
            _ => (0, -radius),
        };
        return Point::new(center.x + dx, center.y + dy);
    }
    let theta = angle_deg.to_radians();
    Point::new(
        center.x + (radius as f64 * theta.cos()).round() as i64,
        center.y + (radius as f64 * theta.sin()).round() as i64,
    )
}

/// Samples `segments + 1` points along an arc from `start_deg` to `end_deg`.
///
/// The sweep may run in either direction; endpoints are included.
pub fn arc_points(
    center: Point,
    radius: i64,
    start_deg: f64,
    end_deg: f64,
    segments: usize,
) -> Vec<Point> {
    let n = segments.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            arc_point(center, radius, start_deg + t * (end_deg - start_deg))
        })
        .collect()
}

/// An annular sector polygon between two radii, swept from `start_deg` to
/// `end_deg`.
///
/// This is the outline of a curved waveguide of width `r_out - r_in`.
pub fn annular_sector(
    center: Point,
    r_in: i64,
    r_out: i64,
    start_deg: f64,
    end_deg: f64,
    segments: usize,
) -> Polygon {
    let mut points = arc_points(center, r_out, start_deg, end_deg, segments);
    let inner = arc_points(center, r_in, end_deg, start_deg, segments);
    points.extend(inner);
    Polygon::from_verts(points)
}

/// The length of an arc of the given radius swept through `sweep_deg`
/// degrees, in the same unit as `radius`.
pub fn arc_length(radius: i64, sweep_deg: f64) -> f64 {
    sweep_deg.abs().to_radians() * radius as f64
}

/// A reasonable segment count for sampling a quarter arc of the given
/// radius, bounded below so small bends stay smooth.
pub fn segments_for(radius: i64) -> usize {
    (radius / 200).clamp(16, 256) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cardinal_angles_are_exact() {
        let c = Point::new(100, -50);
        assert_eq!(arc_point(c, 1000, 0.), Point::new(1100, -50));
        assert_eq!(arc_point(c, 1000, 90.), Point::new(100, 950));
        assert_eq!(arc_point(c, 1000, 180.), Point::new(-900, -50));
        assert_eq!(arc_point(c, 1000, 270.), Point::new(100, -1050));
        assert_eq!(arc_point(c, 1000, -90.), Point::new(100, -1050));
        assert_eq!(arc_point(c, 1000, 450.), Point::new(100, 950));
    }

    #[test]
    fn arc_points_include_endpoints() {
        let pts = arc_points(Point::zero(), 10_000, -90., 0., 64);
        assert_eq!(pts.len(), 65);
        assert_eq!(*pts.first().unwrap(), Point::new(0, -10_000));
        assert_eq!(*pts.last().unwrap(), Point::new(10_000, 0));
    }

    #[test]
    fn annular_sector_is_closed_outline() {
        let poly = annular_sector(Point::zero(), 9_750, 10_250, 0., 90., 32);
        assert_eq!(poly.len(), 2 * 33);
    }

    #[test]
    fn quarter_arc_length() {
        assert_relative_eq!(
            arc_length(10_000, 90.),
            std::f64::consts::PI * 10_000. / 2.,
            epsilon = 1e-9
        );
    }
}
