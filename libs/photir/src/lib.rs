//! Layout IR for photonic components.
//!
//! A photonic layout is a DAG of [`Cell`]s. Each cell owns primitive
//! elements (shapes and texts on layers of type `L`), placed instances of
//! child cells, named [`Port`]s, and a string-keyed [`Settings`] map
//! recording the parameters and derived quantities it was built from.
//!
//! Cells are immutable once built and are shared as `Arc<Cell<L>>`; a
//! factory hands its caller a finished cell and never mutates it again.

pub mod library;
pub mod names;
pub mod settings;

use std::sync::Arc;

use arcstr::ArcStr;
use geometry::bbox::Bbox;
use geometry::orientation::Rotation;
use geometry::point::Point;
use geometry::rect::Rect;
use geometry::transform::{Transform, Transformation};

pub use library::{Library, LibraryBuilder};
pub use names::Names;
pub use settings::{Setting, Settings};

/// The kind of connection a port represents.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum PortKind {
    /// An optical waveguide port.
    #[default]
    Optical,
    /// An electrical pad or wire port.
    Electrical,
}

/// A location at which a cell connects to the outside.
///
/// `orientation` is the outward direction: two ports mate when their
/// centers coincide and their orientations are opposite.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Port {
    /// The kind of connection.
    pub kind: PortKind,
    /// The port center.
    pub center: Point,
    /// The outward-facing direction.
    pub orientation: Rotation,
    /// The cross-section width at the port, in nanometers.
    pub width: i64,
}

impl Port {
    /// Creates an optical port.
    pub fn optical(center: Point, orientation: Rotation, width: i64) -> Self {
        Self {
            kind: PortKind::Optical,
            center,
            orientation,
            width,
        }
    }

    /// Creates an electrical port.
    pub fn electrical(center: Point, orientation: Rotation, width: i64) -> Self {
        Self {
            kind: PortKind::Electrical,
            center,
            orientation,
            width,
        }
    }

    /// Maps this port through a transformation.
    pub fn transform(&self, trans: Transformation) -> Port {
        Port {
            kind: self.kind,
            center: trans.apply(self.center),
            orientation: trans.apply_rotation(self.orientation),
            width: self.width,
        }
    }
}

/// A primitive layout shape consisting of a layer and a geometric shape.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Shape<L> {
    layer: L,
    shape: geometry::shape::Shape,
}

impl<L> Shape<L> {
    /// Creates a new layout shape.
    #[inline]
    pub fn new(layer: L, shape: impl Into<geometry::shape::Shape>) -> Self {
        Self {
            layer,
            shape: shape.into(),
        }
    }

    /// The layer this shape is on.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// The geometric shape.
    #[inline]
    pub fn shape(&self) -> &geometry::shape::Shape {
        &self.shape
    }

    /// Converts the layer type with the given mapping.
    pub fn map_layer<L2>(&self, f: impl FnOnce(&L) -> L2) -> Shape<L2> {
        Shape {
            layer: f(&self.layer),
            shape: self.shape.clone(),
        }
    }
}

impl<L> Bbox for Shape<L> {
    fn bbox(&self) -> Option<Rect> {
        self.shape.bbox()
    }
}

/// A primitive text annotation.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Text<L> {
    layer: L,
    text: ArcStr,
    loc: Point,
}

impl<L> Text<L> {
    /// Creates a new text annotation at the given location.
    #[inline]
    pub fn new(layer: L, text: impl Into<ArcStr>, loc: Point) -> Self {
        Self {
            layer,
            text: text.into(),
            loc,
        }
    }

    /// The layer this annotation is on.
    #[inline]
    pub fn layer(&self) -> &L {
        &self.layer
    }

    /// The annotation text.
    #[inline]
    pub fn text(&self) -> &ArcStr {
        &self.text
    }

    /// The annotation location.
    #[inline]
    pub fn loc(&self) -> Point {
        self.loc
    }

    /// Converts the layer type with the given mapping.
    pub fn map_layer<L2>(&self, f: impl FnOnce(&L) -> L2) -> Text<L2> {
        Text {
            layer: f(&self.layer),
            text: self.text.clone(),
            loc: self.loc,
        }
    }
}

impl<L> Bbox for Text<L> {
    fn bbox(&self) -> Option<Rect> {
        Some(Rect::from_point(self.loc))
    }
}

/// A primitive layout element.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum Element<L> {
    /// A primitive layout shape.
    Shape(Shape<L>),
    /// A primitive text annotation.
    Text(Text<L>),
}

impl<L> Element<L> {
    /// Converts the layer type with the given mapping.
    pub fn map_layer<L2>(&self, f: impl FnOnce(&L) -> L2) -> Element<L2> {
        match self {
            Element::Shape(s) => Element::Shape(s.map_layer(f)),
            Element::Text(t) => Element::Text(t.map_layer(f)),
        }
    }
}

impl<L> Bbox for Element<L> {
    fn bbox(&self) -> Option<Rect> {
        match self {
            Element::Shape(shape) => shape.bbox(),
            Element::Text(text) => text.bbox(),
        }
    }
}

impl<L> From<Shape<L>> for Element<L> {
    fn from(value: Shape<L>) -> Self {
        Self::Shape(value)
    }
}

impl<L> From<Text<L>> for Element<L> {
    fn from(value: Text<L>) -> Self {
        Self::Text(value)
    }
}

/// A placed instance of a child cell.
#[derive(Debug, Clone)]
pub struct Instance<L> {
    cell: Arc<Cell<L>>,
    name: ArcStr,
    trans: Transformation,
}

impl<L> Instance<L> {
    /// Creates an instance of `cell` at the origin.
    pub fn new(cell: impl Into<Arc<Cell<L>>>, name: impl Into<ArcStr>) -> Self {
        Self {
            cell: cell.into(),
            name: name.into(),
            trans: Transformation::identity(),
        }
    }

    /// Creates an instance with the given transformation.
    pub fn with_transformation(
        cell: impl Into<Arc<Cell<L>>>,
        name: impl Into<ArcStr>,
        trans: Transformation,
    ) -> Self {
        Self {
            cell: cell.into(),
            name: name.into(),
            trans,
        }
    }

    /// Creates an instance placed so that its port `port_name` mates the
    /// given target port: centers coincident, orientations opposite.
    ///
    /// The placement uses rotation only. Entering a bend cell through its
    /// far port therefore traverses it in the opposite sense, which is how
    /// assemblies realize clockwise turns from a counterclockwise bend.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no port named `port_name`.
    pub fn connect(
        cell: impl Into<Arc<Cell<L>>>,
        name: impl Into<ArcStr>,
        port_name: &str,
        target: &Port,
    ) -> Self {
        let cell = cell.into();
        let child = *cell.port(port_name);
        let rotation = target
            .orientation
            .opposite()
            .then(child.orientation.inverse());
        Self::new(cell, name)
            .with_orientation(rotation)
            .align_port(port_name, target.center)
    }

    /// Sets the orientation, keeping the current offset.
    pub fn with_orientation(mut self, orientation: impl Into<geometry::orientation::Orientation>) -> Self {
        self.trans.orientation = orientation.into();
        self
    }

    /// Sets the offset so the transformed center of port `port_name` lands
    /// on `to`.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no port named `port_name`.
    pub fn align_port(mut self, port_name: &str, to: Point) -> Self {
        let center = self.cell.port(port_name).center;
        self.trans.offset = to - self.trans.orientation.apply(center);
        self
    }

    /// The instantiated cell.
    #[inline]
    pub fn cell(&self) -> &Arc<Cell<L>> {
        &self.cell
    }

    /// The instance name.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// The transformation from the child frame to the parent frame.
    #[inline]
    pub fn transformation(&self) -> Transformation {
        self.trans
    }

    /// A port of the child cell, transformed into the parent frame.
    ///
    /// # Panics
    ///
    /// Panics if the cell has no port with the given name.
    pub fn port(&self, name: &str) -> Port {
        self.cell.port(name).transform(self.trans)
    }

    /// A port of the child cell, transformed into the parent frame.
    pub fn try_port(&self, name: &str) -> Option<Port> {
        self.cell.try_port(name).map(|p| p.transform(self.trans))
    }
}

impl<L> Bbox for Instance<L> {
    fn bbox(&self) -> Option<Rect> {
        self.cell.bbox().map(|rect| rect.transform(self.trans))
    }
}

/// A photonic layout cell.
#[derive(Debug, Clone, Default)]
pub struct Cell<L> {
    name: ArcStr,
    elements: Vec<Element<L>>,
    instances: Vec<Instance<L>>,
    ports: indexmap::IndexMap<ArcStr, Port>,
    settings: Settings,
}

impl<L> Cell<L> {
    /// Creates a new, empty cell.
    pub fn new(name: impl Into<ArcStr>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            instances: Vec::new(),
            ports: indexmap::IndexMap::new(),
            settings: Settings::new(),
        }
    }

    /// The name of the cell.
    #[inline]
    pub fn name(&self) -> &ArcStr {
        &self.name
    }

    /// Adds a primitive element to this cell.
    pub fn add_element(&mut self, element: impl Into<Element<L>>) {
        self.elements.push(element.into());
    }

    /// Iterates over the primitive elements of this cell.
    pub fn elements(&self) -> impl Iterator<Item = &Element<L>> {
        self.elements.iter()
    }

    /// Adds a child instance to this cell.
    pub fn add_instance(&mut self, instance: Instance<L>) {
        self.instances.push(instance);
    }

    /// Iterates over the child instances of this cell.
    pub fn instances(&self) -> impl Iterator<Item = &Instance<L>> {
        self.instances.iter()
    }

    /// Adds a port to this cell.
    pub fn add_port(&mut self, name: impl Into<ArcStr>, port: Port) {
        self.ports.insert(name.into(), port);
    }

    /// Iterates over the ports of this cell, in insertion order.
    pub fn ports(&self) -> impl Iterator<Item = (&ArcStr, &Port)> {
        self.ports.iter()
    }

    /// Iterates over the optical ports of this cell.
    pub fn optical_ports(&self) -> impl Iterator<Item = (&ArcStr, &Port)> {
        self.ports
            .iter()
            .filter(|(_, p)| p.kind == PortKind::Optical)
    }

    /// Gets a port of this cell by name.
    ///
    /// # Panics
    ///
    /// Panics if the port does not exist.
    pub fn port(&self, name: &str) -> &Port {
        match self.ports.get(name) {
            Some(port) => port,
            None => {
                tracing::error!("no port named `{}` on cell `{}`", name, self.name);
                panic!("no port named `{}` on cell `{}`", name, self.name);
            }
        }
    }

    /// Gets a port of this cell by name.
    #[inline]
    pub fn try_port(&self, name: &str) -> Option<&Port> {
        self.ports.get(name)
    }

    /// The settings this cell was built with.
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Records a setting on this cell.
    pub fn set(&mut self, key: impl Into<ArcStr>, value: impl Into<Setting>) {
        self.settings.insert(key, value);
    }
}

impl<L> Bbox for Cell<L> {
    fn bbox(&self) -> Option<Rect> {
        let mut result = self.elements.bbox();
        for inst in &self.instances {
            result = match (result, inst.bbox()) {
                (Some(acc), Some(r)) => Some(acc.union(r)),
                (None, r) => r,
                (r, None) => r,
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geometry::rect::Rect;

    fn stub_cell() -> Cell<u8> {
        let mut cell = Cell::new("stub");
        cell.add_element(Shape::new(0u8, Rect::from_sides(0, -250, 10_000, 250)));
        cell.add_port("W0", Port::optical(Point::zero(), Rotation::R180, 500));
        cell.add_port("E0", Port::optical(Point::new(10_000, 0), Rotation::R0, 500));
        cell
    }

    #[test]
    fn instance_ports_are_transformed() {
        let cell = Arc::new(stub_cell());
        let inst = Instance::with_transformation(
            cell,
            "i0",
            Transformation::from_offset_and_orientation(Point::new(0, 100), Rotation::R90),
        );
        let e0 = inst.port("E0");
        assert_eq!(e0.center, Point::new(0, 10_100));
        assert_eq!(e0.orientation, Rotation::R90);
    }

    #[test]
    fn connect_mates_ports() {
        let cell = Arc::new(stub_cell());
        let upstream = Port::optical(Point::new(500, 500), Rotation::R90, 500);
        let inst = Instance::connect(cell, "i0", "W0", &upstream);
        let w0 = inst.port("W0");
        assert_eq!(w0.center, upstream.center);
        assert_eq!(w0.orientation, upstream.orientation.opposite());
        // The far end continues in the upstream direction.
        let e0 = inst.port("E0");
        assert_eq!(e0.orientation, Rotation::R90);
        assert_eq!(e0.center, Point::new(500, 10_500));
    }

    #[test]
    fn cell_bbox_includes_instances() {
        let cell = Arc::new(stub_cell());
        let mut parent: Cell<u8> = Cell::new("parent");
        parent.add_instance(Instance::with_transformation(
            cell,
            "i0",
            Transformation::translate(1_000, 0),
        ));
        assert_eq!(
            parent.bbox(),
            Some(Rect::from_sides(1_000, -250, 11_000, 250))
        );
    }
}
