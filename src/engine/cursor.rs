//! Execution cursor

/// Position in the active sequence plus the granularity being walked.
///
/// `index` is `-1` before anything has executed; otherwise operations
/// `0..=index` of the active sequence are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: isize,
    atomic: bool,
}

impl Cursor {
    pub fn new(atomic: bool) -> Self {
        Cursor { index: -1, atomic }
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    pub fn set_atomic(&mut self, atomic: bool) {
        self.atomic = atomic;
    }

    /// Move to `index`, clamped to `[-1, len - 1]`; always `-1` when `len == 0`
    pub fn set_index(&mut self, index: isize, len: usize) {
        self.index = if len == 0 {
            -1
        } else {
            index.clamp(-1, len as isize - 1)
        };
    }

    pub fn advance(&mut self, len: usize) {
        self.set_index(self.index + 1, len);
    }

    /// Position of the next operation to execute, if there is one
    pub fn next_position(&self, len: usize) -> Option<usize> {
        self.can_step_forward(len).then(|| (self.index + 1) as usize)
    }

    pub fn can_step_forward(&self, len: usize) -> bool {
        self.index + 1 < len as isize
    }

    /// Stepping back replays from the start and needs two executed steps
    pub fn can_step_backward(&self, len: usize) -> bool {
        self.index > 1 && (self.index as usize) < len
    }
}
