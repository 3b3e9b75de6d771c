//! Component settings.
//!
//! Every cell records the parameters it was built from, plus derived
//! quantities such as total path length, in a string-keyed map. Settings
//! compare equal when the underlying values do, which is how callers assert
//! that two builds of the same component are identical.

use arcstr::ArcStr;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Setting {
    /// A boolean value.
    Bool(bool),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    Str(ArcStr),
}

impl Setting {
    /// The value as a float, if it is one.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(x) => Some(*x),
            _ => None,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(x) => Some(*x),
            _ => None,
        }
    }

    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Setting {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Setting {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Setting {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<ArcStr> for Setting {
    fn from(value: ArcStr) -> Self {
        Self::Str(value)
    }
}

impl From<&str> for Setting {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

/// An ordered, string-keyed map of settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings(IndexMap<ArcStr, Setting>);

impl Settings {
    /// Creates an empty settings map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a setting, replacing any existing value for the key.
    pub fn insert(&mut self, key: impl Into<ArcStr>, value: impl Into<Setting>) {
        self.0.insert(key.into(), value.into());
    }

    /// Gets a setting by key.
    pub fn get(&self, key: &str) -> Option<&Setting> {
        self.0.get(key)
    }

    /// Gets a float setting by key.
    pub fn float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Setting::as_float)
    }

    /// Gets an integer setting by key.
    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Setting::as_int)
    }

    /// Gets a string setting by key.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Setting::as_str)
    }

    /// Iterates over the settings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArcStr, &Setting)> {
        self.0.iter()
    }

    /// The number of settings.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_compare_by_value() {
        let mut a = Settings::new();
        a.insert("length", 10.0);
        a.insert("width", 0.5);
        let mut b = Settings::new();
        b.insert("length", 10.0);
        b.insert("width", 0.5);
        assert_eq!(a, b);
        b.insert("width", 0.6);
        assert_ne!(a, b);
    }

    #[test]
    fn typed_accessors() {
        let mut s = Settings::new();
        s.insert("n", 15i64);
        s.insert("polarization", "te");
        assert_eq!(s.int("n"), Some(15));
        assert_eq!(s.string("polarization"), Some("te"));
        assert_eq!(s.float("n"), None);
    }
}
