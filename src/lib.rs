//! # Introduction
//!
//! replaytty replays a recorded sequence of elementary operations against a
//! set of named in-memory data structures. The recording can be stepped
//! forward and backward, jumped through, and viewed at two granularities:
//! *mixed* (composite operations such as `swap` intact) and *atomic* (every
//! composite expanded into its reads and writes). Switching granularity keeps
//! the same logical position.
//!
//! ## Replay pipeline
//!
//! ```text
//! Recording → OperationSequence (mixed + atomic) → ExecutionModel → Registry → TUI
//! ```
//!
//! 1. [`operation`] — the immutable [`operation::Operation`] record and its
//!    locators.
//! 2. [`sequence`] — the mixed/atomic views and index translation between them.
//! 3. [`structures`] — the [`structures::DataStructure`] contract, the
//!    registry, and a reference integer array.
//! 4. [`engine`] — [`engine::ExecutionModel`]: `next`, `previous`,
//!    `goto_index`, `reset`, `clear`, `set_atomic_mode`.
//! 5. [`controller`] — polled auto-play timing.
//! 6. [`demo`] — built-in sorting recordings.
//! 7. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Stepping modes
//!
//! Grouped (default): one step applies every consecutive operation sharing a
//! non-negative group number. Linear: one operation per step. Moving backward
//! and jumping always replay from the first operation.

pub mod cli;
pub mod config;
pub mod controller;
pub mod demo;
pub mod engine;
pub mod error;
pub mod headless;
pub mod operation;
pub mod sequence;
pub mod structures;
pub mod ui;
