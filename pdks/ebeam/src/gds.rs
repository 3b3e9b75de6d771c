//! GDS conversion for EBeam layouts.

use std::collections::HashMap;
use std::sync::Arc;

use gdsout::{GdsLayer, GdsUnits};
use geometry::rect::Rect;
use geometry::transform::{Transform, Transformation};
use photir::{Cell, Instance, Shape, Text};

use crate::layers::EbeamLayer;
use crate::Component;

/// The units used for exporting GDS libraries: micrometer user units over
/// nanometer database units.
pub const GDS_UNITS: GdsUnits = GdsUnits::new(1e-3, 1e-9);

/// Depth of the pin marker drawn inward from each port plane.
const PIN_DEPTH: i64 = 100;

/// Converts a component hierarchy to GDS layers.
///
/// Ports become pin marker rectangles on PinRec with a label carrying the
/// port name, so downstream tools can recover connectivity.
pub fn to_gds(component: &Component) -> Arc<Cell<GdsLayer>> {
    let mut memo = HashMap::new();
    convert_cell(component, &mut memo)
}

fn convert_cell(
    cell: &Arc<Cell<EbeamLayer>>,
    memo: &mut HashMap<*const Cell<EbeamLayer>, Arc<Cell<GdsLayer>>>,
) -> Arc<Cell<GdsLayer>> {
    if let Some(converted) = memo.get(&Arc::as_ptr(cell)) {
        return converted.clone();
    }
    let mut out = Cell::new(cell.name().clone());
    for element in cell.elements() {
        out.add_element(element.map_layer(|layer| layer.gds_layer()));
    }
    for inst in cell.instances() {
        let child = convert_cell(inst.cell(), memo);
        out.add_instance(Instance::with_transformation(
            child,
            inst.name().clone(),
            inst.transformation(),
        ));
    }
    for (name, port) in cell.ports() {
        // Pin marker in the port frame: a thin rectangle just inside the
        // port plane, plus the port-name label at its center.
        let marker = Rect::from_sides(-PIN_DEPTH, -port.width / 2, 0, port.width / 2);
        let trans = Transformation::from_offset_and_orientation(port.center, port.orientation);
        let pin = EbeamLayer::PinRec.gds_layer();
        out.add_element(Shape::new(pin, marker.transform(trans)));
        out.add_element(Text::new(pin, name.clone(), trans.apply(marker.center())));
        out.add_port(name.clone(), *port);
    }
    let converted = Arc::new(out);
    memo.insert(Arc::as_ptr(cell), converted.clone());
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ebeam;

    #[test]
    fn conversion_preserves_hierarchy_and_adds_pins() {
        let pdk = Ebeam::new();
        let mzi = pdk.mzi(Default::default()).unwrap();
        let gds = to_gds(&mzi);
        assert_eq!(gds.name(), mzi.name());
        assert_eq!(gds.instances().count(), mzi.instances().count());
        // Two ports, each contributing a marker and a label.
        assert_eq!(gds.elements().count(), 4);
    }

    #[test]
    fn shared_cells_convert_once() {
        let pdk = Ebeam::new();
        let mzi = pdk.mzi(Default::default()).unwrap();
        let gds = to_gds(&mzi);
        // The two arm spans instantiate the same child cell.
        let spans: Vec<_> = gds
            .instances()
            .filter(|i| i.name().ends_with("_span"))
            .collect();
        assert_eq!(spans.len(), 2);
        assert!(Arc::ptr_eq(spans[0].cell(), spans[1].cell()));
    }
}
