// Integration tests for the replay engine

use replaytty::engine::{ExecutionFault, ExecutionListener, ExecutionModel, ExecutionState, MessageLevel};
use replaytty::operation::{Locator, Operation, Slot};
use replaytty::sequence::IntegrityWarning;
use replaytty::structures::{ArrayStructure, StructureRegistry};
use std::cell::RefCell;
use std::rc::Rc;

fn array(values: &[i64]) -> StructureRegistry {
    StructureRegistry::new().with(ArrayStructure::new("a", values.to_vec()))
}

fn contents(model: &ExecutionModel) -> Vec<Option<i64>> {
    model
        .structures()
        .get("a")
        .expect("array registered")
        .values()
}

fn some(values: &[i64]) -> Vec<Option<i64>> {
    values.iter().copied().map(Some).collect()
}

#[derive(Default)]
struct Recorder {
    batches: Vec<usize>,
    messages: Vec<(String, MessageLevel)>,
    states: Vec<ExecutionState>,
}

#[derive(Clone, Default)]
struct SharedRecorder(Rc<RefCell<Recorder>>);

impl ExecutionListener for SharedRecorder {
    fn operations_executed(&mut self, batch: &[Operation]) {
        self.0.borrow_mut().batches.push(batch.len());
    }

    fn state_changed(&mut self, state: &ExecutionState) {
        self.0.borrow_mut().states.push(*state);
    }

    fn message(&mut self, text: &str, level: MessageLevel) {
        self.0.borrow_mut().messages.push((text.to_string(), level));
    }
}

#[test]
fn test_write_write_swap_linear() {
    let mut model = ExecutionModel::with_modes("writes", false, false);
    model.load(
        array(&[0, 0]),
        vec![
            Operation::write(Locator::at("a", 0), 5),
            Operation::write(Locator::at("a", 1), 7),
            Operation::swap(Locator::at("a", 0), Locator::at("a", 1)),
        ],
    );

    model.next();
    model.next();
    assert_eq!(contents(&model), some(&[5, 7]));

    let step = model.next();
    assert_eq!(step.executed.len(), 1);
    assert_eq!(contents(&model), some(&[7, 5]));
    assert_eq!(model.index(), 2);
    assert!(!model.can_step_forward());
}

#[test]
fn test_swap_with_unresolved_operand_faults() {
    let recorder = SharedRecorder::default();
    let mut model = ExecutionModel::with_modes("faults", false, false);
    model.add_listener(Box::new(recorder.clone()));
    model.load(
        array(&[1, 2]),
        vec![
            Operation::swap(Locator::at("ghost", 0), Locator::at("a", 1)),
            Operation::write(Locator::at("a", 0), 9),
        ],
    );

    let step = model.next();
    assert!(step.executed.is_empty());
    assert!(matches!(
        step.faults[0],
        ExecutionFault::UnresolvedSwapOperand { position: 0, slot: Slot::Var1, .. }
    ));
    assert_eq!(model.index(), 0);
    assert_eq!(contents(&model), some(&[1, 2]));

    let recorded = recorder.0.borrow();
    assert!(recorded
        .messages
        .iter()
        .any(|(_, level)| *level == MessageLevel::Severe));
}

#[test]
fn test_malformed_composite_stays_unexpanded() {
    let recorder = SharedRecorder::default();
    let mut model = ExecutionModel::new("malformed");
    model.add_listener(Box::new(recorder.clone()));

    let broken = Operation::swap(Locator::at("a", 0), Locator::at("a", 1))
        .composite(vec![
            Operation::read(Locator::at("a", 0)),
            Operation::write(Locator::at("a", 0), 2),
        ])
        .with_atomic_step_count(3);
    model.load(array(&[1, 2]), vec![broken, Operation::message("end")]);

    assert_eq!(
        model.warnings(),
        &[IntegrityWarning::ExpansionMismatch {
            position: 0,
            declared: 3,
            actual: 2
        }]
    );
    assert_eq!(model.sequence().atomic().len(), 2);
    assert!(recorder
        .0
        .borrow()
        .messages
        .iter()
        .any(|(text, level)| text.contains("declares 3") && *level == MessageLevel::Severe));

    model.set_atomic_mode(true);
    model.next();
    assert_eq!(contents(&model), some(&[2, 1]));
}

#[test]
fn test_goto_is_idempotent_and_deterministic() {
    let ops: Vec<Operation> = (0..6)
        .map(|i| Operation::write(Locator::at("a", i % 3), i as i64 * 10))
        .collect();

    let mut jumped = ExecutionModel::with_modes("jump", false, false);
    jumped.load(array(&[0, 0, 0]), ops.clone());
    let first = jumped.goto_index(4);
    assert_eq!(first.executed.len(), 1);
    let again = jumped.goto_index(4);
    assert!(again.is_empty());

    let mut stepped = ExecutionModel::with_modes("step", false, false);
    stepped.load(array(&[0, 0, 0]), ops);
    for _ in 0..5 {
        stepped.next();
    }

    assert_eq!(jumped.index(), stepped.index());
    assert_eq!(contents(&jumped), contents(&stepped));

    // Jumping backward replays the same prefix
    jumped.goto_index(1);
    assert_eq!(contents(&jumped), some(&[0, 10, 0]));

    // Out of range targets are clamped
    jumped.goto_index(100);
    assert_eq!(jumped.index(), 5);
    jumped.goto_index(-7);
    assert_eq!(jumped.index(), 0);
}

#[test]
fn test_atomic_round_trip_keeps_position() {
    let ops = vec![
        Operation::write(Locator::at("a", 0), 3),
        Operation::swap_values(Locator::at("a", 0), 3, Locator::at("a", 1), 8),
        Operation::write(Locator::at("a", 2), 1),
    ];
    let mut model = ExecutionModel::with_modes("round", false, false);
    model.load(array(&[0, 8, 0]), ops);

    model.goto_index(1);
    let mixed = contents(&model);

    model.set_atomic_mode(true);
    assert_eq!(model.index(), 3);
    assert_eq!(model.len(), 5);
    assert_eq!(contents(&model), mixed);

    model.set_atomic_mode(false);
    assert_eq!(model.index(), 1);
    assert_eq!(contents(&model), mixed);
}

#[test]
fn test_stepping_limits() {
    let mut empty = ExecutionModel::new("empty");
    assert!(!empty.can_step_forward());
    assert!(empty.next().is_empty());
    assert!(empty.goto_index(3).is_empty());
    assert_eq!(empty.index(), -1);

    let mut model = ExecutionModel::with_modes("limits", false, false);
    model.load(
        array(&[0]),
        vec![
            Operation::write(Locator::at("a", 0), 1),
            Operation::write(Locator::at("a", 0), 2),
            Operation::write(Locator::at("a", 0), 3),
        ],
    );

    assert!(!model.can_step_backward());
    model.next();
    model.next();
    assert_eq!(model.index(), 1);
    assert!(!model.can_step_backward());
    assert!(model.previous().is_empty());

    model.next();
    assert!(model.can_step_backward());
    assert!(!model.can_step_forward());
    assert!(model.next().is_empty());

    model.previous();
    assert_eq!(model.index(), 1);
    assert_eq!(contents(&model), some(&[2]));
}

#[test]
fn test_grouped_batches_reach_listeners_once() {
    let recorder = SharedRecorder::default();
    let mut model = ExecutionModel::new("groups");
    model.add_listener(Box::new(recorder.clone()));
    model.load(
        array(&[0, 0]),
        vec![
            Operation::write(Locator::at("a", 0), 1).with_group(0),
            Operation::write(Locator::at("a", 1), 2).with_group(0),
            Operation::message("halfway"),
            Operation::write(Locator::at("a", 0), 3).with_group(1),
        ],
    );

    model.next();
    model.next();
    model.next();

    let recorded = recorder.0.borrow();
    assert_eq!(recorded.batches, vec![2, 1, 1]);
    assert!(recorded
        .messages
        .contains(&("halfway".to_string(), MessageLevel::Normal)));
    assert_eq!(recorded.states.last().map(|s| s.index), Some(3));
    assert!(recorded.states.last().is_some_and(|s| !s.can_step_forward));
}

#[test]
fn test_reset_and_clear() {
    let mut model = ExecutionModel::with_modes("reset", false, false);
    model.load(
        array(&[4, 4]),
        vec![
            Operation::write(Locator::at("a", 0), 1),
            Operation::write(Locator::at("a", 1), 2),
        ],
    );
    model.goto_index(1);

    model.reset();
    assert_eq!(model.index(), 0);
    assert_eq!(contents(&model), some(&[1, 4]));

    model.rewind();
    assert_eq!(model.index(), -1);
    assert_eq!(contents(&model), some(&[4, 4]));

    model.clear();
    assert!(model.is_clear());
    assert!(model.is_empty());
    assert!(model.structures().get("a").is_none());
}

#[test]
fn test_set_operations_rewinds_and_reports_warnings() {
    let recorder = SharedRecorder::default();
    let mut model = ExecutionModel::with_modes("swap-recording", false, false);
    model.add_listener(Box::new(recorder.clone()));
    model.load(
        array(&[1, 2]),
        vec![
            Operation::write(Locator::at("a", 0), 8),
            Operation::write(Locator::at("a", 1), 9),
        ],
    );
    model.goto_index(1);
    assert_eq!(contents(&model), some(&[8, 9]));

    let broken = Operation::swap(Locator::at("a", 0), Locator::at("a", 1))
        .composite(vec![Operation::read(Locator::at("a", 0))])
        .with_atomic_step_count(2);
    model.set_operations(vec![broken, Operation::write(Locator::at("a", 1), 5)]);

    assert_eq!(model.index(), -1);
    assert_eq!(contents(&model), some(&[1, 2]));
    assert_eq!(model.warnings().len(), 1);
    assert!(recorder
        .0
        .borrow()
        .messages
        .iter()
        .any(|(text, level)| text.contains("declares 2") && *level == MessageLevel::Severe));

    model.next();
    assert_eq!(contents(&model), some(&[2, 1]));
}

#[test]
fn test_set_structures_rewinds_onto_new_registry() {
    let mut model = ExecutionModel::with_modes("swap-structures", false, false);
    model.load(
        array(&[1, 2]),
        vec![
            Operation::write(Locator::at("a", 0), 8),
            Operation::write(Locator::at("a", 1), 9),
        ],
    );
    model.goto_index(1);

    model.set_structures(array(&[3, 4, 5]));
    assert_eq!(model.index(), -1);
    assert_eq!(model.len(), 2);
    assert_eq!(contents(&model), some(&[3, 4, 5]));

    model.next();
    assert_eq!(contents(&model), some(&[8, 4, 5]));
}

#[test]
fn test_grouped_composite_steps_together_in_both_views() {
    let ops = vec![
        Operation::write(Locator::at("a", 0), 1).with_group(0),
        Operation::swap_values(Locator::at("a", 0), 1, Locator::at("a", 1), 2).with_group(0),
        Operation::message("done"),
    ];

    let mut mixed = ExecutionModel::with_modes("mixed", true, false);
    mixed.load(array(&[0, 2]), ops.clone());
    let mixed_step = mixed.next();

    let mut atomic = ExecutionModel::with_modes("atomic", true, true);
    atomic.load(array(&[0, 2]), ops);
    let atomic_step = atomic.next();

    assert_eq!(mixed_step.executed.len(), 2);
    assert_eq!(atomic_step.executed.len(), 4);
    assert_eq!(contents(&mixed), some(&[2, 1]));
    assert_eq!(contents(&atomic), contents(&mixed));
}
