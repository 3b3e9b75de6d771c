//! Spiral delay lines with external ports.

use arcstr::ArcStr;
use geometry::arc::arc_length;
use geometry::orientation::Rotation;
use geometry::point::Point;
use photir::{Cell, Instance, Port};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, BendCircular, Pcell, Waveguide};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A double rectangular spiral.
///
/// Two point-symmetric arms wind outward from a central straight, so both
/// ends sit on the outside of the spiral. Same-arm loops are spaced two
/// guide pitches apart; the other arm fills the gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spiral {
    /// Half-loops per arm.
    pub n: i64,
    /// Bend radius of every corner.
    pub bend_radius: i64,
    /// Edge-to-edge spacing between adjacent guides.
    pub spacing: i64,
    /// Length of the central straight joining the two arms.
    pub x_inner_offset: i64,
    /// Extra length added to the innermost horizontal segments.
    pub x_inner_length_cutback: i64,
    /// Extra length added to the innermost vertical segments.
    pub y_straight_inner_top: i64,
    /// Core width.
    pub width: i64,
}

impl Default for Spiral {
    fn default() -> Self {
        Self {
            n: 6,
            bend_radius: 10_000,
            spacing: 2_000,
            x_inner_offset: 100_000,
            x_inner_length_cutback: 0,
            y_straight_inner_top: 0,
            width: 500,
        }
    }
}

/// Walks waveguide and bend instances along a path, tracking position,
/// heading and accumulated length.
struct Turtle<'a> {
    cell: &'a mut Cell<EbeamLayer>,
    pos: Point,
    heading: Rotation,
    width: i64,
    prefix: &'static str,
    seq: usize,
    straight_nm: i64,
    arcs: i64,
}

impl<'a> Turtle<'a> {
    fn new(
        cell: &'a mut Cell<EbeamLayer>,
        pos: Point,
        heading: Rotation,
        width: i64,
        prefix: &'static str,
    ) -> Self {
        Self {
            cell,
            pos,
            heading,
            width,
            prefix,
            seq: 0,
            straight_nm: 0,
            arcs: 0,
        }
    }

    /// The outward-facing port at the current cursor.
    fn port(&self) -> Port {
        Port::optical(self.pos, self.heading, self.width)
    }

    fn advance(&mut self, inst: Instance<EbeamLayer>, exit: &str) {
        let out = inst.port(exit);
        self.pos = out.center;
        self.heading = out.orientation;
        self.cell.add_instance(inst);
        self.seq += 1;
    }

    fn forward(&mut self, pdk: &Ebeam, length: i64) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        let wg = pdk.waveguide(Waveguide {
            length,
            width: self.width,
        })?;
        let name = arcstr::format!("{}_seg{}", self.prefix, self.seq);
        let inst = Instance::connect(wg, name, "W0", &self.port());
        self.straight_nm += length;
        self.advance(inst, "E0");
        Ok(())
    }

    fn turn_left(&mut self, pdk: &Ebeam, radius: i64) -> Result<()> {
        let bend = pdk.bend_circular(BendCircular {
            radius,
            width: self.width,
        })?;
        let name = arcstr::format!("{}_bend{}", self.prefix, self.seq);
        let inst = Instance::connect(bend, name, "W0", &self.port());
        self.arcs += 1;
        self.advance(inst, "N0");
        Ok(())
    }
}

impl Spiral {
    /// One arm of the spiral: straights grow by two pitches every full
    /// loop so the rotated copy of the arm nests between the loops.
    fn trace_arm(&self, pdk: &Ebeam, turtle: &mut Turtle) -> Result<()> {
        let pitch = self.width + self.spacing;
        let base_x = 2 * self.bend_radius + self.x_inner_length_cutback;
        let base_y = 2 * self.bend_radius + self.y_straight_inner_top;
        for k in 0..2 * self.n {
            let base = if k % 2 == 0 { base_x } else { base_y };
            turtle.forward(pdk, base + (k / 2) * 2 * pitch)?;
            turtle.turn_left(pdk, self.bend_radius)?;
        }
        turtle.forward(pdk, base_x + self.n * pitch)?;
        Ok(())
    }
}

impl Pcell for Spiral {
    const KIND: &'static str = "spiral";

    fn name(&self) -> ArcStr {
        arcstr::format!("spiral_n{}_r{}", self.n, fmt_um(self.bend_radius))
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.n < 1 {
            return Err(Error::invalid(Self::KIND, "n must be at least 1"));
        }
        if self.x_inner_offset <= 0 {
            return Err(Error::invalid(Self::KIND, "x_inner_offset must be positive"));
        }
        if self.spacing < self.width {
            return Err(Error::invalid(
                Self::KIND,
                "spacing must be at least the guide width",
            ));
        }
        if self.x_inner_length_cutback < 0 || self.y_straight_inner_top < 0 {
            return Err(Error::invalid(Self::KIND, "inner lengths must be non-negative"));
        }

        let mut cell = Cell::new(self.name());

        let c = self.x_inner_offset;
        let c2 = c / 2;
        let center = pdk.waveguide(Waveguide {
            length: c,
            width: self.width,
        })?;
        cell.add_instance(
            Instance::new(center, "center").align_port("W0", Point::new(-c2, 0)),
        );

        let mut arm_a = Turtle::new(&mut cell, Point::new(c - c2, 0), Rotation::R0, self.width, "a");
        self.trace_arm(pdk, &mut arm_a)?;
        let port_a = arm_a.port();
        let (straight_a, arcs_a) = (arm_a.straight_nm, arm_a.arcs);

        let mut arm_b = Turtle::new(&mut cell, Point::new(-c2, 0), Rotation::R180, self.width, "b");
        self.trace_arm(pdk, &mut arm_b)?;
        let port_b = arm_b.port();
        let (straight_b, arcs_b) = (arm_b.straight_nm, arm_b.arcs);

        let quarter = arc_length(self.bend_radius, 90.);
        let total_nm =
            (c + straight_a + straight_b) as f64 + (arcs_a + arcs_b) as f64 * quarter;

        cell.add_port("W0", port_b);
        cell.add_port("E0", port_a);
        cell.set("total_length", total_nm / 1e3);
        cell.set("n", self.n);
        cell.set("bend_radius", um(self.bend_radius));
        cell.set("spacing", um(self.spacing));
        Ok(cell)
    }
}
