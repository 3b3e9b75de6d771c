//! The SiEPIC EBeam silicon photonics process design kit.
//!
//! A library of parametric layout components for electron-beam silicon
//! photonics: waveguides, bends, splitters, grating couplers, spirals,
//! rings and interferometers, plus a registry mapping component-type names
//! to factories and helpers that wrap components for fiber coupling.
//!
//! ```
//! use ebeam::components::Mzi;
//! use ebeam::Ebeam;
//!
//! let pdk = Ebeam::new();
//! let mzi = pdk
//!     .mzi(Mzi {
//!         delta_length: 50_000,
//!         ..Default::default()
//!     })
//!     .unwrap();
//! assert_eq!(mzi.settings().float("delta_length"), Some(50.0));
//! ```
#![warn(missing_docs)]

pub mod cache;
pub mod components;
pub mod error;
pub mod fiber;
pub mod gds;
pub mod layers;
pub mod registry;
pub mod tech;
#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use cache::CellCache;
use components::{BendCircular, GcTe1550, Mzi, Pcell, RingSingle, Spiral, Waveguide, YSplitter};
use error::Result;
use gdsout::GdsExportOpts;
use layers::EbeamLayer;
use tech::Tech;

pub use error::Error;

/// A finished layout component: an immutable, shared cell.
pub type Component = Arc<photir::Cell<EbeamLayer>>;

/// The EBeam PDK.
///
/// Holds the technology constants and the content-addressed cell cache;
/// every component factory hangs off this value.
#[derive(Debug, Default)]
pub struct Ebeam {
    tech: Tech,
    cache: CellCache,
}

impl Ebeam {
    /// Creates a PDK with default technology constants.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a PDK with the given technology constants.
    pub fn with_tech(tech: Tech) -> Self {
        Self {
            tech,
            cache: CellCache::new(),
        }
    }

    /// The technology constants.
    pub fn tech(&self) -> &Tech {
        &self.tech
    }

    /// Builds (or fetches from the cache) the component described by
    /// `pcell`.
    pub fn generate<P: Pcell>(&self, pcell: &P) -> Result<Component> {
        self.cache
            .get_or_build(P::KIND, pcell, || pcell.build(self).map(Arc::new))
    }

    /// A straight waveguide.
    pub fn waveguide(&self, params: Waveguide) -> Result<Component> {
        self.generate(&params)
    }

    /// A 90-degree circular bend.
    pub fn bend_circular(&self, params: BendCircular) -> Result<Component> {
        self.generate(&params)
    }

    /// A 1x2 Y-branch splitter.
    pub fn y_splitter(&self, params: YSplitter) -> Result<Component> {
        self.generate(&params)
    }

    /// A TE 1550 nm grating coupler.
    pub fn gc_te1550(&self, params: GcTe1550) -> Result<Component> {
        self.generate(&params)
    }

    /// A Mach-Zehnder interferometer.
    pub fn mzi(&self, params: Mzi) -> Result<Component> {
        self.generate(&params)
    }

    /// A double spiral delay line.
    pub fn spiral(&self, params: Spiral) -> Result<Component> {
        self.generate(&params)
    }

    /// An all-pass ring resonator.
    pub fn ring_single(&self, params: RingSingle) -> Result<Component> {
        self.generate(&params)
    }

    /// Wraps a component with grating couplers on all optical ports.
    pub fn add_gc(&self, component: &Component, component_name: Option<&str>) -> Result<Component> {
        fiber::add_gc(self, component, component_name)
    }

    /// A fiber-coupled Mach-Zehnder interferometer.
    pub fn mzi_te(&self, params: Mzi) -> Result<Component> {
        let component = self.mzi(params)?;
        self.add_gc(&component, None)
    }

    /// A fiber-coupled spiral, named after its total path length.
    pub fn spiral_te(&self, params: Spiral) -> Result<Component> {
        let component = self.spiral(params)?;
        let length = component
            .settings()
            .float("total_length")
            .unwrap_or_default();
        let name = arcstr::format!("spiral_te_{}", length as i64);
        self.add_gc(&component, Some(&name))
    }

    /// A fiber-coupled ring resonator.
    pub fn ring_single_te(&self, params: RingSingle) -> Result<Component> {
        let component = self.ring_single(params)?;
        self.add_gc(&component, None)
    }

    /// Builds the registered component type `name` with default
    /// parameters.
    ///
    /// Fails with [`Error::UnknownComponentType`] if `name` is not
    /// registered.
    pub fn component(&self, name: &str) -> Result<Component> {
        registry::registry().get_factory(name)?(self)
    }

    /// Writes a component and everything it instantiates to a GDS file.
    pub fn write_gds(&self, component: &Component, path: impl AsRef<Path>) -> Result<()> {
        let root = gds::to_gds(component);
        let mut builder = photir::LibraryBuilder::new();
        let top = builder.add_tree(&root);
        let lib = builder.build();
        gdsout::write_gds_file(
            &lib,
            &GdsExportOpts {
                name: top,
                units: gds::GDS_UNITS,
            },
            path,
        )?;
        Ok(())
    }
}
