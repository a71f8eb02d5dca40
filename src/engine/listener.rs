//! Execution listeners and observable state
//!
//! Collaborators (renderers, consoles, tests) subscribe to an
//! [`ExecutionModel`](super::ExecutionModel) with an [`ExecutionListener`].
//! Every method has an empty default, so a listener only implements what it
//! cares about.

use crate::operation::Operation;

/// Severity of a message delivered to listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Message operations from the recording
    Normal,
    /// Faults hit while executing
    Severe,
}

/// Snapshot of everything a UI needs to enable or disable its controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionState {
    pub index: isize,
    pub len: usize,
    pub can_step_forward: bool,
    pub can_step_backward: bool,
    pub is_empty: bool,
    pub is_clear: bool,
    pub atomic: bool,
    pub parallel: bool,
}

/// Subscriber to an execution model
pub trait ExecutionListener {
    /// Called once per user-visible step with the operations it applied
    fn operations_executed(&mut self, _batch: &[Operation]) {}

    /// Called whenever any field of the observable state changes
    fn state_changed(&mut self, _state: &ExecutionState) {}

    /// Called for message operations and faults
    fn message(&mut self, _text: &str, _level: MessageLevel) {}
}
