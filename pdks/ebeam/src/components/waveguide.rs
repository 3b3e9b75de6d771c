//! Straight strip waveguides.

use arcstr::ArcStr;
use geometry::orientation::Rotation;
use geometry::point::Point;
use geometry::rect::Rect;
use photir::{Cell, Port, Shape};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, Pcell};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A straight waveguide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Waveguide {
    /// Length along the propagation direction.
    pub length: i64,
    /// Core width.
    pub width: i64,
}

impl Default for Waveguide {
    fn default() -> Self {
        Self {
            length: 10_000,
            width: 500,
        }
    }
}

impl Pcell for Waveguide {
    const KIND: &'static str = "waveguide";

    fn name(&self) -> ArcStr {
        arcstr::format!("waveguide_l{}_w{}", fmt_um(self.length), fmt_um(self.width))
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.length <= 0 {
            return Err(Error::invalid(Self::KIND, "length must be positive"));
        }
        if self.width <= 0 {
            return Err(Error::invalid(Self::KIND, "width must be positive"));
        }
        let mut cell = Cell::new(self.name());
        let core = Rect::from_sides(0, -self.width / 2, self.length, self.width / 2);
        cell.add_element(Shape::new(EbeamLayer::Si, core));
        cell.add_element(Shape::new(
            EbeamLayer::DevRec,
            core.expand_all(pdk.tech().devrec_margin),
        ));
        cell.add_port("W0", Port::optical(Point::zero(), Rotation::R180, self.width));
        cell.add_port(
            "E0",
            Port::optical(Point::new(self.length, 0), Rotation::R0, self.width),
        );
        cell.set("length", um(self.length));
        cell.set("width", um(self.width));
        Ok(cell)
    }
}
