//! Integer array structure
//!
//! Element semantics per operation kind:
//!
//! | kind     | effect on this array                                         |
//! |----------|--------------------------------------------------------------|
//! | `read`   | if the target is here and a value is recorded, store it      |
//! | `write`  | store `values[0]` at the target, growing the array if needed |
//! | `swap`   | exchange both operands, or take the recorded opposite value  |
//! | `remove` | empty the target slot                                        |
//!
//! Locators addressing other structures are ignored.

use super::DataStructure;
use crate::operation::{Locator, Operation, OperationKind};
use tracing::debug;

/// Largest index a write may grow the array to; writes past it are dropped
pub const MAX_LEN: usize = 1 << 20;

/// A one-dimensional array of optional integers
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayStructure {
    identifier: String,
    initial: Vec<Option<i64>>,
    elements: Vec<Option<i64>>,
}

impl ArrayStructure {
    pub fn new(identifier: impl Into<String>, initial: Vec<i64>) -> Self {
        let initial: Vec<Option<i64>> = initial.into_iter().map(Some).collect();
        ArrayStructure {
            identifier: identifier.into(),
            elements: initial.clone(),
            initial,
        }
    }

    pub fn get(&self, index: usize) -> Option<i64> {
        self.elements.get(index).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Index into this array, if the locator addresses it
    fn own_index(&self, locator: Option<&Locator>) -> Option<usize> {
        locator
            .filter(|loc| loc.identifier == self.identifier)
            .and_then(Locator::first_index)
    }

    fn store(&mut self, index: usize, value: Option<i64>) {
        if index >= MAX_LEN {
            debug!(array = %self.identifier, index, "write past maximum length dropped");
            return;
        }
        if index >= self.elements.len() {
            self.elements.resize(index + 1, None);
        }
        self.elements[index] = value;
    }

    fn apply_swap(&mut self, op: &Operation) {
        let first = self.own_index(op.locators.var1.as_ref());
        let second = self.own_index(op.locators.var2.as_ref());

        match (first, second) {
            (Some(i), Some(j)) if i >= MAX_LEN || j >= MAX_LEN => {
                debug!(array = %self.identifier, i, j, "swap past maximum length dropped");
            }
            (Some(i), Some(j)) => {
                let len = self.elements.len().max(i + 1).max(j + 1);
                if len > self.elements.len() {
                    self.elements.resize(len, None);
                }
                self.elements.swap(i, j);
            }
            // Cross-structure swap: take the value recorded for the other operand
            (Some(i), None) => {
                if let Some(value) = op.values.get(1) {
                    self.store(i, Some(*value));
                }
            }
            (None, Some(j)) => {
                if let Some(value) = op.values.first() {
                    self.store(j, Some(*value));
                }
            }
            (None, None) => {}
        }
    }
}

impl DataStructure for ArrayStructure {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn apply_operation(&mut self, op: &Operation) {
        match op.kind {
            OperationKind::Read | OperationKind::Write => {
                if let (Some(index), Some(value)) =
                    (self.own_index(op.locators.target.as_ref()), op.values.first())
                {
                    self.store(index, Some(*value));
                }
            }
            OperationKind::Swap => self.apply_swap(op),
            OperationKind::Remove => {
                if let Some(index) = self.own_index(op.locators.target.as_ref()) {
                    if index < self.elements.len() {
                        self.elements[index] = None;
                    }
                }
            }
            _ => debug!(array = %self.identifier, kind = %op.kind, "ignored operation"),
        }
    }

    fn clear(&mut self) {
        self.elements.clone_from(&self.initial);
    }

    fn values(&self) -> Vec<Option<i64>> {
        self.elements.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Slot;

    #[test]
    fn test_write_and_grow() {
        let mut a = ArrayStructure::new("a", vec![0, 0]);
        a.apply_operation(&Operation::write(Locator::at("a", 1), 7));
        a.apply_operation(&Operation::write(Locator::at("a", 3), 4));

        assert_eq!(a.values(), vec![Some(0), Some(7), None, Some(4)]);
    }

    #[test]
    fn test_out_of_range_index_ignored() {
        let mut a = ArrayStructure::new("a", vec![1, 2]);
        a.apply_operation(&Operation::write(Locator::at("a", usize::MAX), 7));
        a.apply_operation(&Operation::write(Locator::at("a", MAX_LEN), 7));
        a.apply_operation(&Operation::swap(Locator::at("a", 0), Locator::at("a", usize::MAX)));
        assert_eq!(a.values(), vec![Some(1), Some(2)]);

        a.apply_operation(&Operation::write(Locator::at("a", MAX_LEN - 1), 7));
        assert_eq!(a.len(), MAX_LEN);
        assert_eq!(a.get(MAX_LEN - 1), Some(7));
    }

    #[test]
    fn test_read_without_target_changes_nothing() {
        let mut a = ArrayStructure::new("a", vec![1, 2]);
        a.apply_operation(&Operation::read(Locator::at("a", 0)));
        assert_eq!(a.values(), vec![Some(1), Some(2)]);
    }

    #[test]
    fn test_swap_within_array() {
        let mut a = ArrayStructure::new("a", vec![5, 7]);
        a.apply_operation(&Operation::swap(Locator::at("a", 0), Locator::at("a", 1)));
        assert_eq!(a.values(), vec![Some(7), Some(5)]);
    }

    #[test]
    fn test_cross_structure_swap_uses_recorded_values() {
        let op = Operation::swap(Locator::at("a", 0), Locator::at("b", 0)).with_values(vec![1, 2]);
        let mut a = ArrayStructure::new("a", vec![1]);
        let mut b = ArrayStructure::new("b", vec![2]);

        a.apply_operation(&op);
        b.apply_operation(&op);

        assert_eq!(a.get(0), Some(2));
        assert_eq!(b.get(0), Some(1));
    }

    #[test]
    fn test_remove_empties_slot_and_clear_restores() {
        let mut a = ArrayStructure::new("a", vec![3, 4]);
        a.apply_operation(&Operation::remove(Locator::at("a", 0)));
        assert_eq!(a.values(), vec![None, Some(4)]);

        a.clear();
        assert_eq!(a.values(), vec![Some(3), Some(4)]);
    }

    #[test]
    fn test_foreign_locators_ignored() {
        let mut a = ArrayStructure::new("a", vec![3]);
        a.apply_operation(
            &Operation::write(Locator::at("b", 0), 9).with_locator(Slot::Source, Locator::at("a", 0)),
        );
        assert_eq!(a.values(), vec![Some(3)]);
    }
}
