// Execution model: replays recorded operations against the structure registry

use super::cursor::Cursor;
use super::errors::ExecutionFault;
use super::listener::{ExecutionListener, ExecutionState, MessageLevel};
use crate::operation::{Operation, OperationKind, Slot};
use crate::sequence::{IntegrityWarning, OperationSequence};
use crate::structures::StructureRegistry;
use tracing::{debug, info, trace, warn};

/// The operations applied by one user-visible step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Step {
    /// Applied operations, in execution order
    pub executed: Vec<Operation>,

    /// Operations that consumed a cursor slot but could not be applied
    pub faults: Vec<ExecutionFault>,
}

impl Step {
    /// True when the step neither applied nor faulted on anything
    pub fn is_empty(&self) -> bool {
        self.executed.is_empty() && self.faults.is_empty()
    }

    pub fn has_faults(&self) -> bool {
        !self.faults.is_empty()
    }
}

/// Replay engine over one recording and one structure registry
pub struct ExecutionModel {
    /// Name used in logs
    name: String,

    /// Structures mutated by the operations
    structures: StructureRegistry,

    /// Mixed and atomic views of the recording
    sequence: OperationSequence,

    /// Current position and granularity
    cursor: Cursor,

    /// Whether `next()` executes whole groups
    parallel: bool,

    /// Subscribers notified of batches, messages and state changes
    listeners: Vec<Box<dyn ExecutionListener>>,

    /// Last state published to listeners
    last_state: Option<ExecutionState>,
}

impl ExecutionModel {
    /// Create an empty model with grouped stepping on and atomic mode off
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_modes(name, true, false)
    }

    pub fn with_modes(name: impl Into<String>, parallel: bool, atomic: bool) -> Self {
        ExecutionModel {
            name: name.into(),
            structures: StructureRegistry::new(),
            sequence: OperationSequence::default(),
            cursor: Cursor::new(atomic),
            parallel,
            listeners: Vec::new(),
            last_state: None,
        }
    }

    pub fn add_listener(&mut self, listener: Box<dyn ExecutionListener>) {
        debug!(model = %self.name, "execution listener added");
        self.listeners.push(listener);
        self.last_state = None;
        self.publish_state();
    }

    // ========== Loading ==========

    /// Install a new registry and recording; the cursor goes back before the start
    pub fn load(&mut self, structures: StructureRegistry, operations: Vec<Operation>) {
        self.structures = structures;
        self.install_operations(operations);
    }

    /// Replace the structures and rewind onto them
    pub fn set_structures(&mut self, structures: StructureRegistry) {
        self.structures = structures;
        self.rewind();
    }

    /// Replace the recording and rewind
    pub fn set_operations(&mut self, operations: Vec<Operation>) {
        self.install_operations(operations);
    }

    fn install_operations(&mut self, operations: Vec<Operation>) {
        self.sequence.set(operations);
        info!(
            model = %self.name,
            mixed = self.sequence.mixed().len(),
            atomic = self.sequence.atomic().len(),
            structures = self.structures.len(),
            "recording loaded"
        );

        let warnings: Vec<String> = self.sequence.warnings().iter().map(|w| w.to_string()).collect();
        for text in &warnings {
            self.notify_message(text, MessageLevel::Severe);
        }

        self.rewind();
    }

    // ========== Stepping ==========

    /// Execute the next step: one operation, or a whole group in parallel mode.
    ///
    /// Does nothing (and notifies nobody) when there is nothing left to execute.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Step {
        if !self.can_step_forward() {
            return Step::default();
        }

        let step = if self.parallel {
            self.step_grouped()
        } else {
            self.step_linear()
        };

        self.notify_step(&step);
        self.publish_state();
        step
    }

    /// Step back one operation by replaying the recording from the start
    pub fn previous(&mut self) -> Step {
        if !self.can_step_backward() {
            return Step::default();
        }

        let target = self.cursor.index() - 1;
        debug!(model = %self.name, from = self.cursor.index(), target, "stepping backward");
        let step = self.replay_to(target);

        self.notify_step(&step);
        self.publish_state();
        step
    }

    /// Jump to `target`, clamped into the active sequence.
    ///
    /// Any change of position replays from the start, in either direction.
    pub fn goto_index(&mut self, target: isize) -> Step {
        let len = self.len();
        if len == 0 {
            return Step::default();
        }

        let target = target.clamp(0, len as isize - 1);
        if target == self.cursor.index() {
            return Step::default();
        }

        debug!(model = %self.name, from = self.cursor.index(), target, "jumping");
        let step = self.replay_to(target);

        self.notify_step(&step);
        self.publish_state();
        step
    }

    /// Restore the initial structure contents and place the cursor on the
    /// first operation
    pub fn reset(&mut self) {
        if self.len() == 0 {
            self.rewind();
            return;
        }
        self.replay_to(0);
        self.publish_state();
    }

    /// Restore the initial structure contents and move before the start
    pub fn rewind(&mut self) {
        self.structures.clear_contents();
        self.cursor.set_index(-1, self.len());
        self.publish_state();
    }

    /// Drop every structure and the recording
    pub fn clear(&mut self) {
        self.structures.remove_all();
        self.sequence.clear();
        self.cursor.set_index(-1, 0);
        info!(model = %self.name, "model cleared");
        self.publish_state();
    }

    /// Switch between the mixed and atomic views, keeping the logical position
    pub fn set_atomic_mode(&mut self, atomic: bool) -> Step {
        if self.cursor.is_atomic() == atomic {
            return Step::default();
        }

        let index = self.cursor.index();
        let translated = if atomic {
            self.sequence.mixed_to_atomic(index)
        } else {
            self.sequence.atomic_to_mixed(index)
        };
        info!(model = %self.name, atomic, from = index, to = translated, "granularity switched");

        self.cursor.set_atomic(atomic);
        let step = self.replay_to(translated);

        if self.cursor.index() >= 0 {
            self.notify_step(&step);
        }
        self.publish_state();
        step
    }

    /// Toggle whether `next()` executes whole groups
    pub fn set_parallel_mode(&mut self, parallel: bool) {
        if self.parallel != parallel {
            self.parallel = parallel;
            debug!(model = %self.name, parallel, "parallel execution changed");
            self.publish_state();
        }
    }

    // ========== Queries ==========

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn index(&self) -> isize {
        self.cursor.index()
    }

    /// Length of the active sequence
    pub fn len(&self) -> usize {
        self.sequence.len(self.cursor.is_atomic())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when there are neither structures nor operations
    pub fn is_clear(&self) -> bool {
        self.structures.is_empty() && self.sequence.is_empty()
    }

    pub fn is_atomic(&self) -> bool {
        self.cursor.is_atomic()
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn can_step_forward(&self) -> bool {
        self.cursor.can_step_forward(self.len())
    }

    pub fn can_step_backward(&self) -> bool {
        self.cursor.can_step_backward(self.len())
    }

    /// The active sequence
    pub fn operations(&self) -> &[Operation] {
        self.sequence.active(self.cursor.is_atomic())
    }

    pub fn sequence(&self) -> &OperationSequence {
        &self.sequence
    }

    pub fn warnings(&self) -> &[IntegrityWarning] {
        self.sequence.warnings()
    }

    pub fn structures(&self) -> &StructureRegistry {
        &self.structures
    }

    /// The operation that the next forward step would start with
    pub fn next_operation(&self) -> Option<&Operation> {
        let position = self.cursor.next_position(self.len())?;
        self.operations().get(position)
    }

    pub fn state(&self) -> ExecutionState {
        ExecutionState {
            index: self.index(),
            len: self.len(),
            can_step_forward: self.can_step_forward(),
            can_step_backward: self.can_step_backward(),
            is_empty: self.is_empty(),
            is_clear: self.is_clear(),
            atomic: self.is_atomic(),
            parallel: self.parallel,
        }
    }

    // ========== Progression ==========

    fn step_linear(&mut self) -> Step {
        let mut step = Step::default();
        self.execute_single(&mut step);
        step
    }

    /// Execute the next operation and every following one with the same group.
    /// An ungrouped operation executes alone.
    fn step_grouped(&mut self) -> Step {
        let mut step = Step::default();
        let Some(group) = self.next_operation().map(|op| op.group) else {
            return step;
        };

        self.execute_single(&mut step);
        if group >= 0 {
            while self.next_operation().is_some_and(|op| op.group == group) {
                self.execute_single(&mut step);
            }
        }
        step
    }

    /// Advance the cursor by one and apply the operation there.
    /// Returns false when the sequence is exhausted.
    fn execute_single(&mut self, step: &mut Step) -> bool {
        let len = self.len();
        let Some(position) = self.cursor.next_position(len) else {
            return false;
        };
        self.cursor.advance(len);

        let op = &self.sequence.active(self.cursor.is_atomic())[position];
        trace!(model = %self.name, position, %op, "execute");

        match apply_operation(&mut self.structures, position, op) {
            Ok(()) => step.executed.push(op.clone()),
            Err(fault) => {
                warn!(model = %self.name, %fault, "operation not applied");
                step.faults.push(fault);
            }
        }
        true
    }

    /// Clear the structures and execute single operations from the start
    /// until the cursor reaches `target`. Returns the final step.
    fn replay_to(&mut self, target: isize) -> Step {
        self.structures.clear_contents();
        self.cursor.set_index(-1, self.len());

        let mut last = Step::default();
        while self.cursor.index() < target {
            let mut step = Step::default();
            if !self.execute_single(&mut step) {
                break;
            }
            last = step;
        }
        last
    }

    // ========== Notification ==========

    fn notify_step(&mut self, step: &Step) {
        for op in &step.executed {
            if op.kind == OperationKind::Message {
                let text = op.message.as_deref().unwrap_or_default();
                info!(model = %self.name, "MESSAGE: {}", text);
                self.notify_message(text, MessageLevel::Normal);
            }
        }
        for fault in &step.faults {
            self.notify_message(&fault.to_string(), MessageLevel::Severe);
        }
        for listener in &mut self.listeners {
            listener.operations_executed(&step.executed);
        }
    }

    fn notify_message(&mut self, text: &str, level: MessageLevel) {
        for listener in &mut self.listeners {
            listener.message(text, level);
        }
    }

    /// Notify listeners if the observable state changed since the last call
    fn publish_state(&mut self) {
        let state = self.state();
        if self.last_state == Some(state) {
            return;
        }
        self.last_state = Some(state);
        for listener in &mut self.listeners {
            listener.state_changed(&state);
        }
    }
}

impl std::fmt::Debug for ExecutionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionModel")
            .field("name", &self.name)
            .field("cursor", &self.cursor)
            .field("parallel", &self.parallel)
            .field("len", &self.len())
            .field("structures", &self.structures.identifiers())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Dispatch one operation to the structures it refers to
fn apply_operation(
    structures: &mut StructureRegistry,
    position: usize,
    op: &Operation,
) -> Result<(), ExecutionFault> {
    match &op.kind {
        OperationKind::Message => {}
        OperationKind::Read | OperationKind::Write => {
            let identifiers = [Slot::Source, Slot::Target]
                .into_iter()
                .filter_map(|slot| op.locator(slot))
                .map(|loc| loc.identifier.as_str());
            apply_to_each(structures, identifiers, op);
        }
        OperationKind::Swap => {
            // Both operands must resolve before either side is touched
            let var1 = swap_operand(structures, position, op, Slot::Var1)?;
            let var2 = swap_operand(structures, position, op, Slot::Var2)?;
            apply_to_each(structures, [var1, var2], op);
        }
        OperationKind::Remove => {
            if let Some(target) = op.locator(Slot::Target) {
                apply_to_each(structures, [target.identifier.as_str()], op);
            }
        }
        OperationKind::Other(kind) => {
            return Err(ExecutionFault::UnknownOperationKind {
                position,
                kind: kind.clone(),
            });
        }
    }
    Ok(())
}

/// Apply `op` once to every distinct registered structure among `identifiers`
fn apply_to_each<'a>(
    structures: &mut StructureRegistry,
    identifiers: impl IntoIterator<Item = &'a str>,
    op: &Operation,
) {
    let mut applied: Vec<&str> = Vec::with_capacity(2);
    for identifier in identifiers {
        if applied.contains(&identifier) {
            continue;
        }
        applied.push(identifier);
        match structures.get_mut(identifier) {
            Some(structure) => structure.apply_operation(op),
            None => trace!(identifier, "unresolved locator skipped"),
        }
    }
}

fn swap_operand<'o>(
    structures: &StructureRegistry,
    position: usize,
    op: &'o Operation,
    slot: Slot,
) -> Result<&'o str, ExecutionFault> {
    let locator = op
        .locator(slot)
        .ok_or(ExecutionFault::MissingSwapOperand { position, slot })?;
    if structures.contains(&locator.identifier) {
        Ok(&locator.identifier)
    } else {
        Err(ExecutionFault::UnresolvedSwapOperand {
            position,
            slot,
            identifier: locator.identifier.clone(),
        })
    }
}
