//! Style containers: the per-element style map and the ordered patches
//! the effect catalog produces.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Ordered set of property assignments produced by a single effect.
/// Order is preserved so repeated properties apply last-wins like inline
/// style text would.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StylePatch {
    entries: Vec<(String, String)>,
}

impl StylePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.entries.push((property.to_string(), value.into()));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mutable style state owned by an element record.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct StyleMap {
    props: HashMap<String, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.props.get(property).map(String::as_str)
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        self.props.insert(property.to_string(), value.into());
    }

    /// Returns true when the property was present.
    pub fn remove(&mut self, property: &str) -> bool {
        self.props.remove(property).is_some()
    }

    pub fn apply(&mut self, patch: &StylePatch) {
        for (property, value) in patch.iter() {
            self.set(property, value);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.props.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
}
