//! 1x2 Y-branch splitters.

use arcstr::ArcStr;
use geometry::orientation::Rotation;
use geometry::point::Point;
use geometry::polygon::Polygon;
use photir::{Cell, Port, Shape};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, Pcell};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A symmetric 1x2 splitter: one input on the west side, two outputs on
/// the east side at `±separation/2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YSplitter {
    /// Length of the branching region.
    pub length: i64,
    /// Center-to-center separation of the output guides.
    pub separation: i64,
    /// Core width at the ports.
    pub width: i64,
}

impl Default for YSplitter {
    fn default() -> Self {
        Self {
            length: 1_500,
            separation: 1_250,
            width: 500,
        }
    }
}

impl Pcell for YSplitter {
    const KIND: &'static str = "y_splitter";

    fn name(&self) -> ArcStr {
        arcstr::format!(
            "y_splitter_l{}_s{}",
            fmt_um(self.length),
            fmt_um(self.separation)
        )
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.length <= 0 {
            return Err(Error::invalid(Self::KIND, "length must be positive"));
        }
        if self.separation <= self.width {
            return Err(Error::invalid(
                Self::KIND,
                "output separation must exceed the guide width",
            ));
        }
        let w2 = self.width / 2;
        let s2 = self.separation / 2;
        // Wedge with a V-notch between the output guides.
        let notch_x = self.length * 2 / 3;
        let core = Polygon::from_verts(vec![
            Point::new(0, -w2),
            Point::new(self.length, -s2 - w2),
            Point::new(self.length, -s2 + w2),
            Point::new(notch_x, 0),
            Point::new(self.length, s2 - w2),
            Point::new(self.length, s2 + w2),
            Point::new(0, w2),
        ]);
        let mut cell = Cell::new(self.name());
        cell.add_element(Shape::new(
            EbeamLayer::DevRec,
            geometry::rect::Rect::from_sides(0, -s2 - w2, self.length, s2 + w2)
                .expand_all(pdk.tech().devrec_margin),
        ));
        cell.add_element(Shape::new(EbeamLayer::Si, core));
        cell.add_port("W0", Port::optical(Point::zero(), Rotation::R180, self.width));
        cell.add_port(
            "E0",
            Port::optical(Point::new(self.length, s2), Rotation::R0, self.width),
        );
        cell.add_port(
            "E1",
            Port::optical(Point::new(self.length, -s2), Rotation::R0, self.width),
        );
        cell.set("length", um(self.length));
        cell.set("separation", um(self.separation));
        cell.set("width", um(self.width));
        Ok(cell)
    }
}
