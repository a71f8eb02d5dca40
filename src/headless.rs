//! Plain-text front end: steps a model to the end and prints every batch

use crate::engine::{ExecutionModel, Step};
use crate::structures::StructureRegistry;
use std::io::{self, Write};

/// Step `model` until it is exhausted, writing one block per step to `out`
pub fn run<W: Write>(model: &mut ExecutionModel, out: &mut W) -> io::Result<usize> {
    writeln!(
        out,
        "{} operations ({} mode, {} stepping)",
        model.len(),
        if model.is_atomic() { "atomic" } else { "mixed" },
        if model.is_parallel() { "grouped" } else { "linear" },
    )?;
    for warning in model.warnings() {
        writeln!(out, "warning: {}", warning)?;
    }
    write_structures(out, model.structures())?;

    let mut steps = 0;
    while model.can_step_forward() {
        let step = model.next();
        steps += 1;
        write_step(out, model, &step)?;
    }

    writeln!(out, "done after {} steps", steps)?;
    Ok(steps)
}

fn write_step<W: Write>(out: &mut W, model: &ExecutionModel, step: &Step) -> io::Result<()> {
    writeln!(out, "[{}/{}]", model.index() + 1, model.len())?;
    for op in &step.executed {
        writeln!(out, "  {}", op)?;
    }
    for fault in &step.faults {
        writeln!(out, "  fault: {}", fault)?;
    }
    write_structures(out, model.structures())
}

fn write_structures<W: Write>(out: &mut W, structures: &StructureRegistry) -> io::Result<()> {
    for (identifier, values) in structures.contents() {
        let cells: Vec<String> = values
            .iter()
            .map(|v| v.map_or_else(|| "_".to_string(), |v| v.to_string()))
            .collect();
        writeln!(out, "  {} = [{}]", identifier, cells.join(", "))?;
    }
    Ok(())
}
