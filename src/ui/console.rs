// Console log: collects engine messages and the last executed batch for the TUI

use crate::engine::{ExecutionListener, MessageLevel};
use crate::operation::Operation;
use std::cell::RefCell;
use std::rc::Rc;

/// One line shown in the console pane
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleLine {
    pub text: String,
    pub level: MessageLevel,
}

/// Messages and faults reported by the model, plus the last batch it executed
#[derive(Debug, Clone, Default)]
pub struct ConsoleLog {
    pub lines: Vec<ConsoleLine>,
    pub last_batch: Vec<Operation>,
}

impl ConsoleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, text: impl Into<String>, level: MessageLevel) {
        let text = text.into();
        // Replays re-report the same fault; keep one copy in a row
        if level == MessageLevel::Severe {
            if let Some(last) = self.lines.last() {
                if last.text == text && last.level == level {
                    return;
                }
            }
        }
        self.lines.push(ConsoleLine { text, level });
    }

    /// Whether the last batch addressed `identifier[index]`
    pub fn touched(&self, identifier: &str, index: usize) -> bool {
        self.last_batch.iter().any(|op| {
            op.locators
                .iter()
                .any(|(_, loc)| loc.identifier == identifier && loc.first_index() == Some(index))
        })
    }
}

/// Listener handle registered with the model; the app keeps a clone to read it
#[derive(Debug, Clone, Default)]
pub struct SharedConsole(pub Rc<RefCell<ConsoleLog>>);

impl ExecutionListener for SharedConsole {
    fn operations_executed(&mut self, batch: &[Operation]) {
        self.0.borrow_mut().last_batch = batch.to_vec();
    }

    fn message(&mut self, text: &str, level: MessageLevel) {
        self.0.borrow_mut().push(text, level);
    }
}
