//! Named mutation registry
//!
//! An insertion-ordered map from stable names to entries. Everything the
//! composer writes into the configuration tree (entry points, plugins,
//! cache groups) goes through one of these, so the same name can never be
//! registered twice and the materialization order is the registration order.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered registry keyed by name.
///
/// Re-registering an existing name replaces the entry in place: it keeps the
/// ordinal position of the first registration. Only [`NamedRegistry::remove`]
/// followed by a fresh [`NamedRegistry::register`] moves an entry to the end.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRegistry<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for NamedRegistry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> NamedRegistry<T> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry at `name`.
    ///
    /// Returns the replaced entry, if any.
    pub fn register(&mut self, name: impl Into<String>, value: T) -> Option<T> {
        let name = name.into();
        match self.position(&name) {
            Some(pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Get the entry at `name`, inserting `init()` at the end if absent.
    pub fn get_or_insert_with(&mut self, name: &str, init: impl FnOnce() -> T) -> &mut T {
        let pos = match self.position(name) {
            Some(pos) => pos,
            None => {
                self.entries.push((name.to_string(), init()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos].1
    }

    /// Remove by exact name. No-op when absent.
    pub fn remove(&mut self, name: &str) -> Option<T> {
        let pos = self.position(name)?;
        Some(self.entries.remove(pos).1)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Ordinal position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Registered names in ordinal order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Iterate entries in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(n, value)| (n.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Serialize> Serialize for NamedRegistry<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
