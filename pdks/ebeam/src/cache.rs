//! Content-addressed cell caching.
//!
//! Identical parameters must yield identical components. Rather than rely
//! on implicit global state, every [`Ebeam`](crate::Ebeam) value owns a
//! cache keyed by (generator kind, serialized parameters); a second build
//! with the same key returns the same `Arc`.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;

use crate::error::Result;
use crate::Component;

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    kind: &'static str,
    params: String,
}

/// A cache of generated cells, keyed by generator kind and parameters.
#[derive(Debug, Default)]
pub struct CellCache {
    cells: RwLock<HashMap<CacheKey, Component>>,
}

impl CellCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the cached component for `(kind, params)`, building and
    /// inserting it if absent.
    pub fn get_or_build<P: Serialize>(
        &self,
        kind: &'static str,
        params: &P,
        build: impl FnOnce() -> Result<Component>,
    ) -> Result<Component> {
        let key = CacheKey {
            kind,
            params: serde_json::to_string(params)
                .expect("component parameters serialize to JSON"),
        };
        if let Some(hit) = self.cells.read().unwrap().get(&key) {
            tracing::debug!(kind, "cell cache hit");
            return Ok(hit.clone());
        }
        tracing::debug!(kind, "cell cache miss");
        let built = build()?;
        let mut cells = self.cells.write().unwrap();
        // If another thread built the same cell concurrently, keep the
        // first insertion so all callers share one Arc.
        Ok(cells.entry(key).or_insert(built).clone())
    }

    /// The number of cached cells.
    pub fn len(&self) -> usize {
        self.cells.read().unwrap().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
