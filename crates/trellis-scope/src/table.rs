//! First-registration-wins name tables.

use indexmap::IndexMap;
use trellis_core::Registration;

/// A name → value table where the first registration of a name wins.
#[derive(Debug, Clone)]
pub struct NameTable<T> {
    entries: IndexMap<String, T>,
}

impl<T> Default for NameTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NameTable<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert `value` under `name` unless the name is already taken.
    pub fn insert(&mut self, name: &str, value: T) -> Registration {
        if self.entries.contains_key(name) {
            return Registration::AlreadyExists;
        }
        self.entries.insert(name.to_string(), value);
        Registration::Inserted
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
