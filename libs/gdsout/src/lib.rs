//! GDSII stream-format emission for photonic layout libraries.
//!
//! Writer only: layouts are generated, never read back. Each record is
//! `[2-byte length][1-byte record type][1-byte data type][payload]`, with
//! all integers big-endian and floats in the GDSII excess-64 format.

pub mod write;

use arcstr::ArcStr;

pub use write::{export_gds, write_gds_file, GdsExportOpts};

/// A GDS layer specification: layer number and data type.
#[derive(Debug, Copy, Clone, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct GdsLayer(pub u16, pub u16);

/// The units of a GDS library.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GdsUnits {
    /// The size of a database unit in user units.
    user_per_db: f64,
    /// The size of a database unit in meters.
    meters_per_db: f64,
}

impl GdsUnits {
    /// Creates a new set of units.
    pub const fn new(user_per_db: f64, meters_per_db: f64) -> Self {
        Self {
            user_per_db,
            meters_per_db,
        }
    }

    /// The size of a database unit in user units.
    pub const fn user_per_db(&self) -> f64 {
        self.user_per_db
    }

    /// The size of a database unit in meters.
    pub const fn meters_per_db(&self) -> f64 {
        self.meters_per_db
    }
}

impl Default for GdsUnits {
    /// Micrometer user units over nanometer database units.
    fn default() -> Self {
        Self::new(1e-3, 1e-9)
    }
}

/// The [`GdsError`] result type.
pub type GdsResult<T> = Result<T, GdsError>;

/// A GDS emission error.
#[derive(thiserror::Error, Debug)]
pub enum GdsError {
    /// An error writing the output stream.
    #[error("error writing GDS stream: {0}")]
    Io(#[from] std::io::Error),
    /// A coordinate does not fit in the 32-bit GDS coordinate range.
    #[error("coordinate {0} exceeds the GDS 32-bit range")]
    CoordinateOverflow(i64),
    /// An instance references a cell that is not part of the library.
    #[error("instance `{0}` references a cell missing from the library")]
    MissingCell(ArcStr),
}
