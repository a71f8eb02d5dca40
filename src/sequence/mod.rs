//! Operation sequence store
//!
//! [`OperationSequence`] owns the two views of one recording:
//!
//! - **mixed**: the operations exactly as recorded, composites intact
//! - **atomic**: every composite replaced in place by its expansion
//!
//! It also keeps the *span* of each mixed operation, the number of atomic
//! slots it occupies. Spans drive the index translation used when the
//! engine switches granularity:
//!
//! ```text
//! mixed   [ w0 ][ swap1      ][ w2 ]
//! atomic  [ w0 ][ r ][ w ][ w ][ w2 ]
//! spans      1        3          1
//! ```
//!
//! A composite whose expansion is missing or has the wrong length keeps
//! span 1 and appears unexpanded in the atomic view.

use crate::operation::Operation;
use thiserror::Error;
use tracing::{debug, warn};

/// Data-integrity problems found while deriving the atomic view
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    #[error(
        "operation {position} declares {declared} atomic steps but its expansion has {actual}; \
         kept unexpanded"
    )]
    ExpansionMismatch {
        position: usize,
        declared: usize,
        actual: usize,
    },
}

/// Mixed and atomic views of one recording
#[derive(Debug, Clone, Default)]
pub struct OperationSequence {
    mixed: Vec<Operation>,
    atomic: Vec<Operation>,
    spans: Vec<usize>,
    warnings: Vec<IntegrityWarning>,
}

impl OperationSequence {
    pub fn new(mixed: Vec<Operation>) -> Self {
        let mut sequence = OperationSequence::default();
        sequence.set(mixed);
        sequence
    }

    /// Replace the recording and derive the atomic view
    pub fn set(&mut self, mixed: Vec<Operation>) {
        let mut atomic = Vec::with_capacity(mixed.len());
        let mut spans = Vec::with_capacity(mixed.len());
        let mut warnings = Vec::new();

        for (position, op) in mixed.iter().enumerate() {
            if !op.is_composite() {
                atomic.push(op.clone());
                spans.push(1);
            } else if op.has_valid_expansion() {
                atomic.extend(op.atomic_expansion.iter().cloned());
                spans.push(op.atomic_expansion.len());
            } else {
                let warning = IntegrityWarning::ExpansionMismatch {
                    position,
                    declared: op.atomic_step_count,
                    actual: op.atomic_expansion.len(),
                };
                warn!(%warning, "malformed composite operation");
                warnings.push(warning);
                atomic.push(op.clone());
                spans.push(1);
            }
        }

        debug!(
            mixed = mixed.len(),
            atomic = atomic.len(),
            warnings = warnings.len(),
            "operation sequence set"
        );

        self.mixed = mixed;
        self.atomic = atomic;
        self.spans = spans;
        self.warnings = warnings;
    }

    pub fn clear(&mut self) {
        self.mixed.clear();
        self.atomic.clear();
        self.spans.clear();
        self.warnings.clear();
    }

    pub fn mixed(&self) -> &[Operation] {
        &self.mixed
    }

    pub fn atomic(&self) -> &[Operation] {
        &self.atomic
    }

    /// The view walked in the given granularity
    pub fn active(&self, atomic: bool) -> &[Operation] {
        if atomic {
            &self.atomic
        } else {
            &self.mixed
        }
    }

    pub fn len(&self, atomic: bool) -> usize {
        self.active(atomic).len()
    }

    pub fn is_empty(&self) -> bool {
        self.mixed.is_empty()
    }

    pub fn warnings(&self) -> &[IntegrityWarning] {
        &self.warnings
    }

    /// Translate a mixed index into the atomic index of the same logical point.
    ///
    /// `-1` maps to `-1`. Indices past the end are clamped to the last operation.
    pub fn mixed_to_atomic(&self, index: isize) -> isize {
        if index < 0 || self.spans.is_empty() {
            return -1;
        }
        let last = (index as usize).min(self.spans.len() - 1);
        let covered: usize = self.spans[..=last].iter().sum();
        covered as isize - 1
    }

    /// Translate an atomic index into a mixed index.
    ///
    /// The result is the last mixed operation whose whole span has executed at
    /// `index`. A position inside a composite's span maps to the mixed
    /// operation before that composite.
    pub fn atomic_to_mixed(&self, index: isize) -> isize {
        if index < 0 {
            return -1;
        }
        let mut result = -1;
        let mut covered = 0usize;
        for (position, span) in self.spans.iter().enumerate() {
            covered += span;
            if covered as isize - 1 > index {
                break;
            }
            result = position as isize;
        }
        result
    }
}
