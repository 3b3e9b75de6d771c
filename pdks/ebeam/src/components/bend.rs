//! Circular 90-degree bends.

use arcstr::ArcStr;
use geometry::arc::{annular_sector, arc_length, segments_for};
use geometry::orientation::Rotation;
use geometry::point::Point;
use photir::{Cell, Port, Shape};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, Pcell};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A 90-degree circular bend, turning a west-entering guide to the north.
///
/// Entering through `N0` instead traverses the same cell in the opposite
/// sense, which is how assemblies make clockwise turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BendCircular {
    /// Centerline radius.
    pub radius: i64,
    /// Core width.
    pub width: i64,
}

impl Default for BendCircular {
    fn default() -> Self {
        Self {
            radius: 10_000,
            width: 500,
        }
    }
}

impl Pcell for BendCircular {
    const KIND: &'static str = "bend_circular";

    fn name(&self) -> ArcStr {
        arcstr::format!(
            "bend_circular_r{}_w{}",
            fmt_um(self.radius),
            fmt_um(self.width)
        )
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.width <= 0 {
            return Err(Error::invalid(Self::KIND, "width must be positive"));
        }
        if self.radius <= self.width / 2 {
            return Err(Error::invalid(
                Self::KIND,
                format!(
                    "radius {} is unachievable for width {}",
                    self.radius, self.width
                ),
            ));
        }
        let mut cell = Cell::new(self.name());
        // Arc center sits directly above the west port; the guide sweeps
        // from heading east at (0, 0) to heading north at (r, r).
        let center = Point::new(0, self.radius);
        let core = annular_sector(
            center,
            self.radius - self.width / 2,
            self.radius + self.width / 2,
            -90.,
            0.,
            segments_for(self.radius),
        );
        cell.add_element(Shape::new(EbeamLayer::Si, core));
        cell.add_element(Shape::new(
            EbeamLayer::DevRec,
            geometry::rect::Rect::from_sides(
                0,
                -self.width / 2,
                self.radius + self.width / 2,
                self.radius,
            )
            .expand_all(pdk.tech().devrec_margin),
        ));
        cell.add_port("W0", Port::optical(Point::zero(), Rotation::R180, self.width));
        cell.add_port(
            "N0",
            Port::optical(Point::new(self.radius, self.radius), Rotation::R90, self.width),
        );
        cell.set("radius", um(self.radius));
        cell.set("width", um(self.width));
        cell.set("length", arc_length(self.radius, 90.) / 1e3);
        Ok(cell)
    }
}
