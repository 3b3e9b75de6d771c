//! Component generators.
//!
//! Each generator is a plain parameter struct implementing [`Pcell`]:
//! serializable parameters, a deterministic name derived from them, and a
//! build routine producing the cell. Build through
//! [`Ebeam`](crate::Ebeam) so results are cached.

pub mod bend;
pub mod gc;
pub mod mzi;
pub mod ring;
pub mod spiral;
pub mod waveguide;
pub mod y_splitter;

pub use bend::BendCircular;
pub use gc::GcTe1550;
pub use mzi::Mzi;
pub use ring::RingSingle;
pub use spiral::Spiral;
pub use waveguide::Waveguide;
pub use y_splitter::YSplitter;

use arcstr::ArcStr;
use photir::Cell;
use serde::Serialize;

use crate::error::Result;
use crate::layers::EbeamLayer;
use crate::Ebeam;

/// A parametric component generator.
pub trait Pcell: Serialize {
    /// A stable identifier for the generator, used as the cache-key kind.
    const KIND: &'static str;

    /// The cell name derived from the parameters.
    fn name(&self) -> ArcStr;

    /// Builds the cell.
    fn build(&self, pdk: &Ebeam) -> Result<Cell<EbeamLayer>>;
}

/// Converts nanometers to micrometers.
pub(crate) fn um(nm: i64) -> f64 {
    nm as f64 / 1e3
}

/// Formats a nanometer quantity in micrometers for use in cell names,
/// with `.` replaced by `p` so names stay GDS-friendly.
pub(crate) fn fmt_um(nm: i64) -> String {
    format!("{}", um(nm)).replace('.', "p")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micrometer_name_fragments() {
        assert_eq!(fmt_um(10_000), "10");
        assert_eq!(fmt_um(500), "0p5");
        assert_eq!(fmt_um(100_250), "100p25");
    }
}
