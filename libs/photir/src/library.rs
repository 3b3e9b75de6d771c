//! Flattening cell DAGs into named libraries.
//!
//! A [`Library`] is the unit handed to an output writer: every cell
//! reachable from the added roots appears exactly once, children before
//! parents, with a unique name.

use std::collections::HashMap;
use std::sync::Arc;

use arcstr::ArcStr;

use crate::Cell;

/// Builds a [`Library`] from one or more root cells.
#[derive(Debug)]
pub struct LibraryBuilder<L> {
    cells: Vec<(ArcStr, Arc<Cell<L>>)>,
    by_ptr: HashMap<*const Cell<L>, usize>,
    names: crate::Names<usize>,
}

impl<L> Default for LibraryBuilder<L> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            by_ptr: HashMap::new(),
            names: crate::Names::new(),
        }
    }
}

impl<L> LibraryBuilder<L> {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a cell and everything it instantiates, children first.
    ///
    /// Cells are deduplicated by object identity; adding the same `Arc`
    /// twice is a no-op. Returns the name assigned to the root.
    pub fn add_tree(&mut self, root: &Arc<Cell<L>>) -> ArcStr {
        let ptr = Arc::as_ptr(root);
        if let Some(&idx) = self.by_ptr.get(&ptr) {
            return self.cells[idx].0.clone();
        }
        for inst in root.instances() {
            self.add_tree(inst.cell());
        }
        let idx = self.cells.len();
        let name = self.names.assign_name(idx, root.name());
        tracing::debug!(cell = %name, "adding cell to library");
        self.by_ptr.insert(ptr, idx);
        self.cells.push((name.clone(), root.clone()));
        name
    }

    /// Finishes the build.
    pub fn build(self) -> Library<L> {
        Library {
            by_ptr: self.by_ptr,
            cells: self.cells,
        }
    }
}

/// A set of uniquely named cells in topological (children-first) order.
#[derive(Debug)]
pub struct Library<L> {
    cells: Vec<(ArcStr, Arc<Cell<L>>)>,
    by_ptr: HashMap<*const Cell<L>, usize>,
}

impl<L> Library<L> {
    /// Iterates over `(assigned name, cell)` pairs, children before
    /// parents.
    pub fn cells(&self) -> impl Iterator<Item = (&ArcStr, &Arc<Cell<L>>)> {
        self.cells.iter().map(|(name, cell)| (name, cell))
    }

    /// The name assigned to the given cell, if it is in the library.
    pub fn name_of(&self, cell: &Arc<Cell<L>>) -> Option<&ArcStr> {
        self.by_ptr
            .get(&Arc::as_ptr(cell))
            .map(|&idx| &self.cells[idx].0)
    }

    /// The number of cells in the library.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the library is empty.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Instance;

    #[test]
    fn flattening_dedups_and_orders_children_first() {
        let leaf = Arc::new(Cell::<u8>::new("leaf"));
        let mut mid = Cell::<u8>::new("mid");
        mid.add_instance(Instance::new(leaf.clone(), "l0"));
        mid.add_instance(Instance::new(leaf.clone(), "l1"));
        let mid = Arc::new(mid);
        let mut top = Cell::<u8>::new("top");
        top.add_instance(Instance::new(mid.clone(), "m0"));
        top.add_instance(Instance::new(leaf.clone(), "l2"));
        let top = Arc::new(top);

        let mut builder = LibraryBuilder::new();
        builder.add_tree(&top);
        let lib = builder.build();

        let names: Vec<_> = lib.cells().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["leaf", "mid", "top"]);
        assert_eq!(lib.name_of(&leaf).unwrap(), "leaf");
    }

    #[test]
    fn distinct_cells_with_equal_names_are_uniquified() {
        let a = Arc::new(Cell::<u8>::new("dup"));
        let b = Arc::new(Cell::<u8>::new("dup"));
        let mut top = Cell::<u8>::new("top");
        top.add_instance(Instance::new(a, "a"));
        top.add_instance(Instance::new(b, "b"));
        let top = Arc::new(top);

        let mut builder = LibraryBuilder::new();
        builder.add_tree(&top);
        let lib = builder.build();
        let names: Vec<_> = lib.cells().map(|(n, _)| n.to_string()).collect();
        assert_eq!(names, ["dup", "dup_1", "top"]);
    }
}
