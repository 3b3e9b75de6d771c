//! The component registry.
//!
//! A fixed mapping from component-type names to factories. The registry is
//! built once at first use and never mutated afterwards; factories build
//! with default parameters. Parameterized builds go through the typed
//! methods on [`Ebeam`].

use arcstr::ArcStr;
use indexmap::IndexMap;
use lazy_static::lazy_static;

use crate::components::{BendCircular, GcTe1550, Mzi, RingSingle, Spiral, Waveguide, YSplitter};
use crate::error::{Error, Result};
use crate::{Component, Ebeam};

/// A component factory: builds one component type with default parameters.
pub type Factory = fn(&Ebeam) -> Result<Component>;

/// The name-to-factory mapping enumerating all buildable component types.
pub struct Registry {
    map: IndexMap<ArcStr, Factory>,
}

impl Registry {
    fn build() -> Self {
        let mut map: IndexMap<ArcStr, Factory> = IndexMap::new();
        map.insert(
            arcstr::literal!("waveguide"),
            (|pdk| pdk.waveguide(Waveguide::default())) as Factory,
        );
        map.insert(
            arcstr::literal!("bend_circular"),
            |pdk| pdk.bend_circular(BendCircular::default()),
        );
        map.insert(
            arcstr::literal!("y_splitter"),
            |pdk| pdk.y_splitter(YSplitter::default()),
        );
        map.insert(
            arcstr::literal!("gc_te1550"),
            |pdk| pdk.gc_te1550(GcTe1550::default()),
        );
        map.insert(arcstr::literal!("mzi"), |pdk| pdk.mzi(Mzi::default()));
        map.insert(
            arcstr::literal!("mzi_te"),
            |pdk| pdk.mzi_te(Mzi::default()),
        );
        map.insert(
            arcstr::literal!("spiral_te"),
            |pdk| pdk.spiral_te(Spiral::default()),
        );
        map.insert(
            arcstr::literal!("ring_single_te"),
            |pdk| pdk.ring_single_te(RingSingle::default()),
        );
        Self { map }
    }

    /// Returns the factory registered for `name`.
    pub fn get_factory(&self, name: &str) -> Result<Factory> {
        self.map
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownComponentType(name.into()))
    }

    /// Whether `name` is a registered component type.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Iterates over the registered component-type names.
    pub fn names(&self) -> impl Iterator<Item = &ArcStr> {
        self.map.keys()
    }

    /// The number of registered component types.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

lazy_static! {
    static ref REGISTRY: Registry = Registry::build();
}

/// The process-wide component registry.
pub fn registry() -> &'static Registry {
    &REGISTRY
}
