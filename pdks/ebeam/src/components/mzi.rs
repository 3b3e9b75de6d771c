//! Mach-Zehnder interferometers.

use arcstr::ArcStr;
use geometry::arc::arc_length;
use photir::{Cell, Instance};
use serde::{Deserialize, Serialize};

use super::{fmt_um, um, BendCircular, Pcell, Waveguide, YSplitter};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A Mach-Zehnder interferometer.
///
/// A splitter feeds two arms that rejoin at a combiner. Each arm makes
/// four 90-degree bends around a horizontal span; the top arm's two
/// vertical legs are longer by `delta_length / 2` each, so the arms differ
/// in path length by exactly `delta_length`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mzi {
    /// Path-length imbalance between the arms.
    pub delta_length: i64,
    /// Horizontal span of each arm.
    pub length_x: i64,
    /// Base length of the vertical legs.
    pub length_y: i64,
    /// Bend radius of the eight arm bends.
    pub bend_radius: i64,
    /// Core width.
    pub width: i64,
}

impl Default for Mzi {
    fn default() -> Self {
        Self {
            delta_length: 100_000,
            length_x: 10_000,
            length_y: 2_000,
            bend_radius: 10_000,
            width: 500,
        }
    }
}

impl Pcell for Mzi {
    const KIND: &'static str = "mzi";

    fn name(&self) -> ArcStr {
        arcstr::format!("mzi_dl{}", fmt_um(self.delta_length))
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.delta_length < 0 {
            return Err(Error::invalid(Self::KIND, "delta_length must be non-negative"));
        }
        if self.delta_length % 2 != 0 {
            return Err(Error::invalid(
                Self::KIND,
                "delta_length must be even: it is split across two vertical legs",
            ));
        }
        if self.length_x <= 0 || self.length_y <= 0 {
            return Err(Error::invalid(Self::KIND, "arm lengths must be positive"));
        }

        let splitter = pdk.y_splitter(YSplitter {
            width: self.width,
            ..Default::default()
        })?;
        let bend = pdk.bend_circular(BendCircular {
            radius: self.bend_radius,
            width: self.width,
        })?;
        let ly_top = self.length_y + self.delta_length / 2;
        let wg_span = pdk.waveguide(Waveguide {
            length: self.length_x,
            width: self.width,
        })?;
        let wg_top = pdk.waveguide(Waveguide {
            length: ly_top,
            width: self.width,
        })?;
        let wg_bot = pdk.waveguide(Waveguide {
            length: self.length_y,
            width: self.width,
        })?;

        let sp = Instance::new(splitter.clone(), "splitter");

        // Top arm: up, across, back down. Bends entered through `N0` turn
        // clockwise.
        let b1 = Instance::connect(bend.clone(), "top_bend0", "W0", &sp.port("E0"));
        let s1 = Instance::connect(wg_top.clone(), "top_leg0", "W0", &b1.port("N0"));
        let b2 = Instance::connect(bend.clone(), "top_bend1", "N0", &s1.port("E0"));
        let s2 = Instance::connect(wg_span.clone(), "top_span", "W0", &b2.port("W0"));
        let b3 = Instance::connect(bend.clone(), "top_bend2", "N0", &s2.port("E0"));
        let s3 = Instance::connect(wg_top.clone(), "top_leg1", "W0", &b3.port("W0"));
        let b4 = Instance::connect(bend.clone(), "top_bend3", "W0", &s3.port("E0"));
        let top_end = b4.port("N0");

        // Bottom arm, mirrored.
        let c1 = Instance::connect(bend.clone(), "bot_bend0", "N0", &sp.port("E1"));
        let t1 = Instance::connect(wg_bot.clone(), "bot_leg0", "W0", &c1.port("W0"));
        let c2 = Instance::connect(bend.clone(), "bot_bend1", "W0", &t1.port("E0"));
        let t2 = Instance::connect(wg_span.clone(), "bot_span", "W0", &c2.port("N0"));
        let c3 = Instance::connect(bend.clone(), "bot_bend2", "W0", &t2.port("E0"));
        let t3 = Instance::connect(wg_bot.clone(), "bot_leg1", "W0", &c3.port("N0"));
        let c4 = Instance::connect(bend, "bot_bend3", "N0", &t3.port("E0"));
        let bottom_end = c4.port("W0");

        let comb = Instance::connect(splitter, "combiner", "E1", &top_end);
        // Both arms advance identically, so the combiner's other input
        // lands exactly on the bottom arm's end.
        debug_assert_eq!(comb.port("E0").center, bottom_end.center);

        let quarter = arc_length(self.bend_radius, 90.);
        let length_top = 4. * quarter + (2 * ly_top + self.length_x) as f64;
        let length_bot = 4. * quarter + (2 * self.length_y + self.length_x) as f64;

        let mut cell = Cell::new(self.name());
        let w0 = sp.port("W0");
        let e0 = comb.port("W0");
        for inst in [
            sp, b1, s1, b2, s2, b3, s3, b4, c1, t1, c2, t2, c3, t3, c4, comb,
        ] {
            cell.add_instance(inst);
        }
        cell.add_port("W0", w0);
        cell.add_port("E0", e0);
        cell.set("delta_length", um(self.delta_length));
        cell.set("length_top", length_top / 1e3);
        cell.set("length_bot", length_bot / 1e3);
        cell.set("bend_radius", um(self.bend_radius));
        Ok(cell)
    }
}
