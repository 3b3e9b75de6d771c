//! Grating couplers.

use arcstr::ArcStr;
use geometry::orientation::Rotation;
use geometry::point::Point;
use geometry::polygon::Polygon;
use geometry::rect::Rect;
use photir::{Cell, Port, Shape};
use serde::{Deserialize, Serialize};

use super::{um, Pcell};
use crate::error::{Error, Result};
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A TE-polarized grating coupler for 1550 nm: a linear taper from the
/// strip guide out to the grating width, followed by the grating teeth.
///
/// The guide port `W0` faces east, toward the circuit; the grating extends
/// to the west, under the fiber.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GcTe1550 {
    /// Strip guide width at the port.
    pub wg_width: i64,
    /// Length of the taper from guide to grating.
    pub taper_length: i64,
    /// Width of the grating region.
    pub gc_width: i64,
    /// Grating period.
    pub period: i64,
    /// Fraction of the period occupied by a tooth.
    pub fill: f64,
    /// Number of grating teeth.
    pub n_teeth: i64,
}

impl Default for GcTe1550 {
    fn default() -> Self {
        Self {
            wg_width: 500,
            taper_length: 20_000,
            gc_width: 12_000,
            period: 670,
            fill: 0.5,
            n_teeth: 30,
        }
    }
}

impl Pcell for GcTe1550 {
    const KIND: &'static str = "gc_te1550";

    fn name(&self) -> ArcStr {
        arcstr::literal!("gc_te1550")
    }

    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>> {
        if self.n_teeth <= 0 {
            return Err(Error::invalid(Self::KIND, "n_teeth must be positive"));
        }
        if !(0. ..=1.).contains(&self.fill) {
            return Err(Error::invalid(Self::KIND, "fill must be in [0, 1]"));
        }
        let tooth = (self.period as f64 * self.fill).round() as i64;
        if tooth <= 0 || tooth >= self.period {
            return Err(Error::invalid(
                Self::KIND,
                "fill leaves no tooth or no gap within the period",
            ));
        }
        let w2 = self.wg_width / 2;
        let gw2 = self.gc_width / 2;
        let mut cell = Cell::new(self.name());
        let taper = Polygon::from_verts(vec![
            Point::new(0, -w2),
            Point::new(0, w2),
            Point::new(-self.taper_length, gw2),
            Point::new(-self.taper_length, -gw2),
        ]);
        cell.add_element(Shape::new(EbeamLayer::Si, taper));
        for i in 0..self.n_teeth {
            let hi = -self.taper_length - i * self.period - (self.period - tooth);
            let lo = hi - tooth;
            cell.add_element(Shape::new(
                EbeamLayer::Si,
                Rect::from_sides(lo, -gw2, hi, gw2),
            ));
        }
        let grating_end = -self.taper_length - self.n_teeth * self.period;
        // Fiber alignment target over the middle of the grating.
        let target = Point::new((-self.taper_length + grating_end) / 2, 0);
        cell.add_element(Shape::new(
            EbeamLayer::FbrTgt,
            Rect::from_point(target).expand_all(gw2 / 2),
        ));
        cell.add_element(Shape::new(
            EbeamLayer::DevRec,
            Rect::from_sides(grating_end, -gw2, 0, gw2).expand_all(pdk.tech().devrec_margin),
        ));
        cell.add_port("W0", Port::optical(Point::zero(), Rotation::R0, self.wg_width));
        cell.set("wavelength", 1.55);
        cell.set("polarization", "te");
        cell.set("period", um(self.period));
        cell.set("n_teeth", self.n_teeth);
        Ok(cell)
    }
}
