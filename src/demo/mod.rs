//! Built-in recordings
//!
//! Each [`Demo`] runs a small sorting algorithm over a plain `Vec<i64>` and
//! records every step as an [`Operation`] against one array named
//! [`ARRAY_ID`]. The recordings exercise every engine feature:
//!
//! - grouped reads (both sides of a comparison share a group)
//! - composite swaps with a read/write/write expansion
//! - a closing message operation

use crate::operation::{Locator, Operation, Slot};
use crate::structures::{ArrayStructure, StructureRegistry};
use clap::ValueEnum;
use std::fmt;

/// Identifier of the array every demo records against
pub const ARRAY_ID: &str = "array";

/// Input used when no values are supplied
pub const DEFAULT_VALUES: [i64; 8] = [5, 2, 8, 1, 9, 3, 7, 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    BubbleSort,
    InsertionSort,
}

impl Demo {
    /// Record the demo over `values` (or [`DEFAULT_VALUES`])
    pub fn record(self, values: Option<&[i64]>) -> (StructureRegistry, Vec<Operation>) {
        let values = values.unwrap_or(&DEFAULT_VALUES[..]).to_vec();
        let registry = StructureRegistry::new().with(ArrayStructure::new(ARRAY_ID, values.clone()));
        let operations = match self {
            Demo::BubbleSort => bubble_sort(values),
            Demo::InsertionSort => insertion_sort(values),
        };
        (registry, operations)
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Demo::BubbleSort => write!(f, "bubble sort"),
            Demo::InsertionSort => write!(f, "insertion sort"),
        }
    }
}

fn at(index: usize) -> Locator {
    Locator::at(ARRAY_ID, index)
}

/// Bubble sort: each comparison reads both elements as one group, each
/// exchange is a composite swap
pub fn bubble_sort(mut values: Vec<i64>) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut group = 0;
    let n = values.len();

    for pass in 0..n {
        let mut swapped = false;
        for j in 0..n.saturating_sub(pass + 1) {
            ops.push(Operation::read(at(j)).with_group(group));
            ops.push(Operation::read(at(j + 1)).with_group(group));
            group += 1;

            if values[j] > values[j + 1] {
                ops.push(Operation::swap_values(at(j), values[j], at(j + 1), values[j + 1]));
                values.swap(j, j + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }

    ops.push(Operation::message(format!("sorted {} elements", n)));
    ops
}

/// Insertion sort: each shift reads the left neighbour and writes it one
/// slot to the right as one group
pub fn insertion_sort(mut values: Vec<i64>) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut group = 0;

    for i in 1..values.len() {
        let key = values[i];
        ops.push(Operation::read(at(i)));

        let mut j = i;
        while j > 0 && values[j - 1] > key {
            ops.push(Operation::read(at(j - 1)).with_group(group));
            ops.push(
                Operation::write(at(j), values[j - 1])
                    .with_locator(Slot::Source, at(j - 1))
                    .with_group(group),
            );
            group += 1;
            values[j] = values[j - 1];
            j -= 1;
        }

        if j != i {
            ops.push(Operation::write(at(j), key));
            values[j] = key;
        }
    }

    ops.push(Operation::message(format!("sorted {} elements", values.len())));
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ExecutionModel;

    fn run_to_end(demo: Demo, values: &[i64], parallel: bool, atomic: bool) -> Vec<Option<i64>> {
        let mut model = ExecutionModel::with_modes("demo", parallel, atomic);
        let (registry, ops) = demo.record(Some(values));
        model.load(registry, ops);
        while model.can_step_forward() {
            model.next();
        }
        model.structures().get(ARRAY_ID).unwrap().values()
    }

    #[test]
    fn test_demos_sort_in_every_mode() {
        let input = [4, 1, 3, 9, 7, 2];
        let expected: Vec<Option<i64>> = vec![1, 2, 3, 4, 7, 9].into_iter().map(Some).collect();

        for demo in [Demo::BubbleSort, Demo::InsertionSort] {
            for (parallel, atomic) in [(false, false), (true, false), (false, true), (true, true)] {
                assert_eq!(
                    run_to_end(demo, &input, parallel, atomic),
                    expected,
                    "{} parallel={} atomic={}",
                    demo,
                    parallel,
                    atomic
                );
            }
        }
    }

    #[test]
    fn test_bubble_sort_groups_comparisons() {
        let ops = bubble_sort(vec![2, 1]);
        assert_eq!(ops.len(), 4);
        assert_eq!(ops[0].group, ops[1].group);
        assert!(ops[2].is_composite());
        assert!(ops[3].message.is_some());
    }

    #[test]
    fn test_sorted_input_records_single_pass() {
        let ops = bubble_sort(vec![1, 2, 3]);
        assert!(ops.iter().all(|op| !op.is_composite()));
        assert_eq!(ops.len(), 5);
    }
}
