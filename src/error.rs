//! Crate-level error types
//!
//! Engine faults live in [`crate::engine::errors`] and never abort replay.
//! The errors here are the ones that reject a request outright: invalid
//! controller settings and configuration problems surfaced by the binary.

use thiserror::Error;

/// A request to the auto-play controller was rejected before any state changed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("time between executions cannot be negative (got {0} ms)")]
    NegativeSpeed(i64),

    #[error("tick count must be at least 1 (got {0})")]
    InvalidTickCount(i64),
}

/// Main error type for the replaytty binary
#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

impl ReplayError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
