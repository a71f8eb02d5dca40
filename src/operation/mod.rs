//! Recorded operations
//!
//! An [`Operation`] is an immutable record of one mutation against one or more
//! named structures. Operations are produced by an external source (see
//! [`crate::demo`] for the built-in ones) and consumed by the
//! [`ExecutionModel`](crate::engine::ExecutionModel).
//!
//! # Composite operations
//!
//! A composite (high-level) operation has `atomic_step_count > 1` and carries
//! its decomposition inline in `atomic_expansion`. There is no separate
//! composite type: an atomic operation simply has an empty expansion.
//!
//! ```text
//! swap a[0] ⇄ a[1]   →   read a[0] · write a[0] ← a[1] · write a[1] ← tmp
//! ```

pub mod locator;

pub use locator::{Locator, Locators, Slot};

use std::fmt;

/// What an operation does
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Read,
    Write,
    Swap,
    Remove,
    Message,
    /// A kind the engine does not know how to execute
    Other(String),
}

impl OperationKind {
    pub fn name(&self) -> &str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
            OperationKind::Swap => "swap",
            OperationKind::Remove => "remove",
            OperationKind::Message => "message",
            OperationKind::Other(name) => name,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded mutation
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,

    /// Operations sharing a non-negative group execute together in grouped mode.
    /// Negative means ungrouped.
    pub group: i32,

    pub locators: Locators,

    /// Payload for the structures (written value, swapped values)
    pub values: Vec<i64>,

    /// Text of a message operation
    pub message: Option<String>,

    /// 1 for atomic operations, the declared expansion length for composites
    pub atomic_step_count: usize,

    /// Atomic decomposition; empty for atomic operations
    pub atomic_expansion: Vec<Operation>,
}

impl Operation {
    /// Create an ungrouped atomic operation of the given kind with no operands
    pub fn new(kind: OperationKind) -> Self {
        Operation {
            kind,
            group: -1,
            locators: Locators::default(),
            values: Vec::new(),
            message: None,
            atomic_step_count: 1,
            atomic_expansion: Vec::new(),
        }
    }

    pub fn read(source: Locator) -> Self {
        Operation::new(OperationKind::Read).with_locator(Slot::Source, source)
    }

    pub fn write(target: Locator, value: i64) -> Self {
        Operation::new(OperationKind::Write)
            .with_locator(Slot::Target, target)
            .with_values(vec![value])
    }

    /// Bare swap without recorded values or expansion
    pub fn swap(var1: Locator, var2: Locator) -> Self {
        Operation::new(OperationKind::Swap)
            .with_locator(Slot::Var1, var1)
            .with_locator(Slot::Var2, var2)
    }

    /// Composite swap of `var1` (holding `value1`) and `var2` (holding `value2`),
    /// expanded into a read followed by two writes
    pub fn swap_values(var1: Locator, value1: i64, var2: Locator, value2: i64) -> Self {
        let expansion = vec![
            Operation::read(var1.clone()),
            Operation::write(var1.clone(), value2).with_locator(Slot::Source, var2.clone()),
            Operation::write(var2.clone(), value1),
        ];

        Operation::swap(var1, var2)
            .with_values(vec![value1, value2])
            .composite(expansion)
    }

    pub fn remove(target: Locator) -> Self {
        Operation::new(OperationKind::Remove).with_locator(Slot::Target, target)
    }

    pub fn message(text: impl Into<String>) -> Self {
        let mut op = Operation::new(OperationKind::Message);
        op.message = Some(text.into());
        op
    }

    /// Set the group; a composite's expansion joins the same group so the
    /// atomic view steps it together with its neighbours
    pub fn with_group(mut self, group: i32) -> Self {
        self.group = group;
        for op in &mut self.atomic_expansion {
            op.group = group;
        }
        self
    }

    pub fn with_locator(mut self, slot: Slot, locator: Locator) -> Self {
        self.locators.set(slot, locator);
        self
    }

    pub fn with_values(mut self, values: Vec<i64>) -> Self {
        self.values = values;
        self
    }

    /// Turn this operation into a composite whose step count matches `expansion`
    pub fn composite(mut self, expansion: Vec<Operation>) -> Self {
        self.atomic_step_count = expansion.len().max(1);
        self.atomic_expansion = expansion;
        if self.is_grouped() {
            let group = self.group;
            self = self.with_group(group);
        }
        self
    }

    /// Override the declared step count without touching the expansion
    pub fn with_atomic_step_count(mut self, count: usize) -> Self {
        self.atomic_step_count = count;
        self
    }

    pub fn locator(&self, slot: Slot) -> Option<&Locator> {
        self.locators.get(slot)
    }

    pub fn is_composite(&self) -> bool {
        self.atomic_step_count > 1
    }

    /// Whether the expansion agrees with the declared step count
    pub fn has_valid_expansion(&self) -> bool {
        !self.is_composite() || self.atomic_expansion.len() == self.atomic_step_count
    }

    pub fn is_grouped(&self) -> bool {
        self.group >= 0
    }

    /// Identifiers of every structure this operation refers to
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.locators.iter().map(|(_, loc)| loc.identifier.as_str())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locators = &self.locators;
        match &self.kind {
            OperationKind::Message => {
                write!(f, "message \"{}\"", self.message.as_deref().unwrap_or(""))
            }
            OperationKind::Swap => match (&locators.var1, &locators.var2) {
                (Some(a), Some(b)) => write!(f, "swap {} ⇄ {}", a, b),
                _ => write!(f, "swap (incomplete)"),
            },
            OperationKind::Write | OperationKind::Read => {
                write!(f, "{}", self.kind)?;
                if let Some(target) = &locators.target {
                    write!(f, " {}", target)?;
                    if let Some(value) = self.values.first() {
                        write!(f, " ← {}", value)?;
                    }
                    if let Some(source) = &locators.source {
                        write!(f, " (from {})", source)?;
                    }
                } else if let Some(source) = &locators.source {
                    write!(f, " {}", source)?;
                }
                Ok(())
            }
            kind => {
                write!(f, "{}", kind)?;
                for (_, loc) in locators.iter() {
                    write!(f, " {}", loc)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_values_is_well_formed_composite() {
        let op = Operation::swap_values(Locator::at("a", 0), 3, Locator::at("a", 1), 9);

        assert!(op.is_composite());
        assert_eq!(op.atomic_step_count, 3);
        assert!(op.has_valid_expansion());
        assert_eq!(op.atomic_expansion[0].kind, OperationKind::Read);
        assert_eq!(op.atomic_expansion[1].values, vec![9]);
        assert_eq!(op.atomic_expansion[2].values, vec![3]);
    }

    #[test]
    fn test_group_reaches_expansion() {
        let op = Operation::swap_values(Locator::at("a", 0), 3, Locator::at("a", 1), 9).with_group(4);
        assert!(op.atomic_expansion.iter().all(|step| step.group == 4));

        let op = Operation::swap(Locator::at("a", 0), Locator::at("a", 1))
            .with_group(2)
            .composite(vec![Operation::read(Locator::at("a", 0))]);
        assert_eq!(op.atomic_expansion[0].group, 2);
    }

    #[test]
    fn test_mismatched_expansion_is_detected() {
        let op = Operation::swap(Locator::at("a", 0), Locator::at("a", 1))
            .composite(vec![
                Operation::read(Locator::at("a", 0)),
                Operation::write(Locator::at("a", 1), 1),
            ])
            .with_atomic_step_count(3);

        assert!(op.is_composite());
        assert!(!op.has_valid_expansion());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Operation::write(Locator::at("a", 1), 7).to_string(),
            "write a[1] ← 7"
        );
        assert_eq!(
            Operation::swap(Locator::at("a", 0), Locator::at("a", 1)).to_string(),
            "swap a[0] ⇄ a[1]"
        );
        assert_eq!(Operation::message("done").to_string(), "message \"done\"");
        assert_eq!(
            Operation::new(OperationKind::Other("rotate".into())).to_string(),
            "rotate"
        );
    }

    #[test]
    fn test_new_operation_is_ungrouped_and_atomic() {
        let op = Operation::read(Locator::at("a", 0));
        assert!(!op.is_grouped());
        assert!(!op.is_composite());
        assert!(op.has_valid_expansion());
        assert_eq!(op.identifiers().collect::<Vec<_>>(), vec!["a"]);
    }
}
