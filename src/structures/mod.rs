//! Data structure registry
//!
//! This module provides the structures that operations mutate:
//! - [`DataStructure`]: the contract every visualized structure implements
//! - [`StructureRegistry`]: identifier → structure map owned by the engine
//! - [`array`]: a reference integer array implementation
//!
//! # Contract
//!
//! The engine resolves an operation's locators against the registry and calls
//! [`DataStructure::apply_operation`] once per distinct resolved structure. A
//! structure receives the whole operation and picks out the locators that
//! address it. [`DataStructure::clear`] must restore the contents the
//! structure had when it was registered, since replay starts from there.

pub mod array;

pub use array::ArrayStructure;

use crate::operation::Operation;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt;

/// A mutable structure that operations are replayed against
pub trait DataStructure: fmt::Debug {
    /// The identifier locators use to address this structure
    fn identifier(&self) -> &str;

    /// Apply an operation that refers to this structure
    fn apply_operation(&mut self, op: &Operation);

    /// Restore the initial contents
    fn clear(&mut self);

    /// Current element values; `None` marks an empty slot
    fn values(&self) -> Vec<Option<i64>>;
}

/// Identifier → structure map
#[derive(Debug, Default)]
pub struct StructureRegistry {
    structures: FxHashMap<String, Box<dyn DataStructure>>,
}

impl StructureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a structure under its own identifier, replacing any previous one
    pub fn insert(&mut self, structure: Box<dyn DataStructure>) -> Option<Box<dyn DataStructure>> {
        let identifier = structure.identifier().to_string();
        self.structures.insert(identifier, structure)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, structure: impl DataStructure + 'static) -> Self {
        self.insert(Box::new(structure));
        self
    }

    pub fn get(&self, identifier: &str) -> Option<&dyn DataStructure> {
        self.structures.get(identifier).map(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, identifier: &str) -> Option<&mut (dyn DataStructure + 'static)> {
        self.structures.get_mut(identifier).map(|s| s.as_mut())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.structures.contains_key(identifier)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// Identifiers in sorted order (stable for rendering)
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.structures.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Restore every structure to its initial contents
    pub fn clear_contents(&mut self) {
        for structure in self.structures.values_mut() {
            structure.clear();
        }
    }

    /// Remove every structure
    pub fn remove_all(&mut self) {
        self.structures.clear();
    }

    /// Contents of every structure keyed by identifier
    pub fn contents(&self) -> BTreeMap<String, Vec<Option<i64>>> {
        self.structures
            .iter()
            .map(|(id, s)| (id.clone(), s.values()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{Locator, Operation};

    #[test]
    fn test_clear_contents_keeps_structures() {
        let mut registry = StructureRegistry::new().with(ArrayStructure::new("a", vec![1, 2]));
        registry
            .get_mut("a")
            .unwrap()
            .apply_operation(&Operation::write(Locator::at("a", 0), 9));
        assert_eq!(registry.get("a").unwrap().values(), vec![Some(9), Some(2)]);

        registry.clear_contents();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a").unwrap().values(), vec![Some(1), Some(2)]);

        registry.remove_all();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_identifiers_sorted() {
        let registry = StructureRegistry::new()
            .with(ArrayStructure::new("b", vec![]))
            .with(ArrayStructure::new("a", vec![]));
        assert_eq!(registry.identifiers(), vec!["a", "b"]);
    }
}
