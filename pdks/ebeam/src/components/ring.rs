//! Ring resonators.

use arcstr::ArcStr;
use geometry::arc::arc_length;
use geometry::orientation::Rotation;
use geometry::point::Point;
use photir::{Cell, Instance};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, BendCircular, Pcell, Waveguide};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// An all-pass ring resonator: a bus waveguide coupled to a closed ring
/// assembled from four 90-degree bend instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingSingle {
    /// Ring centerline radius.
    pub radius: i64,
    /// Edge-to-edge coupling gap between bus and ring.
    pub gap: i64,
    /// Core width of bus and ring.
    pub width: i64,
}

impl Default for RingSingle {
    fn default() -> Self {
        Self {
            radius: 10_000,
            gap: 200,
            width: 500,
        }
    }
}

/// Extra bus length on each side of the ring.
const BUS_MARGIN: i64 = 2_000;

impl Pcell for RingSingle {
    const KIND: &'static str = "ring_single";

    fn name(&self) -> ArcStr {
        arcstr::format!("ring_single_r{}_g{}", fmt_um(self.radius), fmt_um(self.gap))
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.gap <= 0 {
            return Err(Error::invalid(Self::KIND, "gap must be positive"));
        }
        if self.radius <= self.width {
            return Err(Error::invalid(Self::KIND, "radius is unachievable for this width"));
        }

        let bus_length = 2 * (self.radius + BUS_MARGIN);
        let bus = pdk.waveguide(Waveguide {
            length: bus_length,
            width: self.width,
        })?;
        let bend = pdk.bend_circular(BendCircular {
            radius: self.radius,
            width: self.width,
        })?;

        let mut cell = Cell::new(self.name());
        let bus_inst = Instance::new(bus, "bus");
        let w0 = bus_inst.port("W0");
        let e0 = bus_inst.port("E0");
        cell.add_instance(bus_inst);

        // Ring center: gap above the bus top edge, measured to the ring's
        // outer edge.
        let center = Point::new(bus_length / 2, self.width + self.gap + self.radius);

        // Southeast quadrant first, then chain counterclockwise around the
        // circle.
        let q0 = Instance::new(bend.clone(), "ring0")
            .align_port("W0", Point::new(center.x, center.y - self.radius));
        let q1 = Instance::connect(bend.clone(), "ring1", "W0", &q0.port("N0"));
        let q2 = Instance::connect(bend.clone(), "ring2", "W0", &q1.port("N0"));
        let q3 = Instance::connect(bend, "ring3", "W0", &q2.port("N0"));
        // The fourth quadrant closes the circle on the first.
        debug_assert_eq!(q3.port("N0").center, q0.port("W0").center);
        for inst in [q0, q1, q2, q3] {
            cell.add_instance(inst);
        }

        cell.add_port("W0", w0);
        cell.add_port("E0", e0);
        cell.set("radius", um(self.radius));
        cell.set("gap", um(self.gap));
        cell.set("width", um(self.width));
        cell.set("circumference", arc_length(self.radius, 360.) / 1e3);
        Ok(cell)
    }
}
