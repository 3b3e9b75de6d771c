//! The set of PDK layers.
#![allow(missing_docs)]

use std::collections::HashMap;

use gdsout::GdsLayer;
use lazy_static::lazy_static;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EbeamLayer {
    /// 220 nm silicon device layer.
    Si,
    /// Silicon nitride device layer.
    SiN,
    M1,
    M2Router,
    MlOpen,
    /// Port marker geometry.
    PinRec,
    /// Device extent recognition.
    DevRec,
    /// Fiber alignment target.
    FbrTgt,
    Text,
    Floorplan,
    Sem,
    Errors,
}

lazy_static! {
    static ref EBEAM_TO_GDS_LAYER: HashMap<EbeamLayer, GdsLayer> = HashMap::from_iter([
        (EbeamLayer::Si, GdsLayer(1, 0)),
        (EbeamLayer::SiN, GdsLayer(4, 0)),
        (EbeamLayer::M1, GdsLayer(11, 0)),
        (EbeamLayer::M2Router, GdsLayer(12, 0)),
        (EbeamLayer::MlOpen, GdsLayer(13, 0)),
        (EbeamLayer::PinRec, GdsLayer(1, 10)),
        (EbeamLayer::DevRec, GdsLayer(68, 0)),
        (EbeamLayer::FbrTgt, GdsLayer(81, 0)),
        (EbeamLayer::Text, GdsLayer(10, 0)),
        (EbeamLayer::Floorplan, GdsLayer(99, 0)),
        (EbeamLayer::Sem, GdsLayer(200, 0)),
        (EbeamLayer::Errors, GdsLayer(999, 0)),
    ]);
}

impl EbeamLayer {
    pub fn gds_layer(&self) -> GdsLayer {
        EBEAM_TO_GDS_LAYER[self]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layer_has_a_gds_mapping() {
        for layer in [
            EbeamLayer::Si,
            EbeamLayer::SiN,
            EbeamLayer::M1,
            EbeamLayer::M2Router,
            EbeamLayer::MlOpen,
            EbeamLayer::PinRec,
            EbeamLayer::DevRec,
            EbeamLayer::FbrTgt,
            EbeamLayer::Text,
            EbeamLayer::Floorplan,
            EbeamLayer::Sem,
            EbeamLayer::Errors,
        ] {
            let _ = layer.gds_layer();
        }
        assert_eq!(EbeamLayer::Si.gds_layer(), GdsLayer(1, 0));
        assert_eq!(EbeamLayer::PinRec.gds_layer(), GdsLayer(1, 10));
    }
}
