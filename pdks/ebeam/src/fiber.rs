//! Fiber-coupled component decoration.
//!
//! Measurement sites couple light in and out through grating couplers. The
//! helpers here wrap an existing component with one coupler per optical
//! port and place the `opt_in` label the measurement flow keys on.

use arcstr::ArcStr;
use photir::{Cell, Instance, Text};

use crate::components::GcTe1550;
use crate::error::Result;
use crate::layers::EbeamLayer;
use crate::{Component, Ebeam};

/// Wraps `component` with a grating coupler on every optical port.
///
/// Each coupler is rotated so its guide port mates the component port
/// directly. The result is named `<component>_te` unless `component_name`
/// overrides it, and records the wrapped component's name in its settings.
pub fn add_gc(
    pdk: &Ebeam,
    component: &Component,
    component_name: Option<&str>,
) -> Result<Component> {
    let gc = pdk.gc_te1550(GcTe1550::default())?;
    let name: ArcStr = match component_name {
        Some(name) => name.into(),
        None => arcstr::format!("{}_te", component.name()),
    };

    let mut cell = Cell::new(name.clone());
    cell.add_instance(Instance::new(component.clone(), "device"));
    let mut label_at = None;
    for (port_name, port) in component.optical_ports() {
        let inst = Instance::connect(
            gc.clone(),
            arcstr::format!("gc_{}", port_name),
            "W0",
            port,
        );
        if label_at.is_none() {
            label_at = Some(port.center);
        }
        cell.add_instance(inst);
    }
    if let Some(loc) = label_at {
        cell.add_element(Text::new(
            EbeamLayer::Text,
            arcstr::format!("opt_in_TE_1550_device_{}", name),
            loc,
        ));
    }

    cell.set("component", component.name().clone());
    cell.set("polarization", "te");
    cell.set("wavelength", 1.55);
    Ok(std::sync::Arc::new(cell))
}
