//! Execution faults
//!
//! This module defines [`ExecutionFault`], the problems the engine can hit
//! while applying a single operation. No fault is fatal: the faulted
//! operation is left out of its batch, the cursor still moves past it, and
//! stepping can continue.

use crate::operation::Slot;
use thiserror::Error;

/// A recorded operation that could not be applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFault {
    /// A swap operand names a structure that is not registered
    #[error("swap at position {position}: {slot} refers to unknown structure '{identifier}'")]
    UnresolvedSwapOperand {
        position: usize,
        slot: Slot,
        identifier: String,
    },

    /// A swap is missing one of its operands entirely
    #[error("swap at position {position}: no {slot} operand")]
    MissingSwapOperand { position: usize, slot: Slot },

    /// The operation kind is not one the engine can execute
    #[error("bad operation type \"{kind}\" at position {position}")]
    UnknownOperationKind { position: usize, kind: String },
}

impl ExecutionFault {
    /// Position of the faulted operation in the active sequence
    pub fn position(&self) -> usize {
        match self {
            ExecutionFault::UnresolvedSwapOperand { position, .. }
            | ExecutionFault::MissingSwapOperand { position, .. }
            | ExecutionFault::UnknownOperationKind { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let fault = ExecutionFault::UnresolvedSwapOperand {
            position: 4,
            slot: Slot::Var1,
            identifier: "ghost".into(),
        };
        assert_eq!(
            fault.to_string(),
            "swap at position 4: var1 refers to unknown structure 'ghost'"
        );
        assert_eq!(fault.position(), 4);
    }
}
