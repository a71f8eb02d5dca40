//! Replay engine
//!
//! This module provides the stepping logic over a recorded operation sequence:
//! - [`model`]: [`ExecutionModel`], the cursor owner and entry points
//! - [`cursor`]: position and granularity bookkeeping
//! - [`listener`]: batch, message and state notifications
//! - [`errors`]: faults raised while applying operations
//!
//! # Execution Model
//!
//! Operations are never undone. Moving backward, jumping, and switching
//! granularity all clear the registry and replay from the first operation:
//!
//! ```text
//! goto(k):  clear structures → index = -1 → apply 0, 1, …, k
//! ```
//!
//! This costs O(k) per jump but needs no inverse for kinds like `remove`.

pub mod cursor;
pub mod errors;
pub mod listener;
pub mod model;

pub use cursor::Cursor;
pub use errors::ExecutionFault;
pub use listener::{ExecutionListener, ExecutionState, MessageLevel};
pub use model::{ExecutionModel, Step};
