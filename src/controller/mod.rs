//! Timed auto-play
//!
//! The engine has no notion of time. [`AutoPlay`] holds the play/pause state
//! and the delay between steps, and the UI event loop calls
//! [`AutoPlay::poll`] on every iteration; when the delay has elapsed it calls
//! [`ExecutionModel::next`]. Playback stops on its own once the model cannot
//! step forward.
//!
//! A step can be subdivided into `tick_count` ticks so renderers can animate
//! progress between two steps (see [`AutoPlay::current_tick`]).

use crate::engine::{ExecutionModel, Step};
use crate::error::ControlError;
use std::time::{Duration, Instant};
use tracing::debug;

/// Delay between auto-play steps unless configured otherwise
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone)]
pub struct AutoPlay {
    speed: Duration,
    tick_count: u32,
    playing: bool,
    last_step: Instant,
}

impl AutoPlay {
    pub fn new(speed: Duration, tick_count: u32) -> Self {
        AutoPlay {
            speed,
            tick_count: tick_count.max(1),
            playing: false,
            last_step: Instant::now(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn speed(&self) -> Duration {
        self.speed
    }

    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Start playing; the first step is due immediately
    pub fn start(&mut self, now: Instant) {
        self.playing = true;
        self.last_step = now.checked_sub(self.speed).unwrap_or(now);
        debug!(speed_ms = self.speed.as_millis() as u64, "auto-play started");
    }

    pub fn stop(&mut self) {
        if self.playing {
            debug!("auto-play stopped");
        }
        self.playing = false;
    }

    pub fn toggle(&mut self, now: Instant) {
        if self.playing {
            self.stop();
        } else {
            self.start(now);
        }
    }

    /// Change the delay between steps. Playback restarts if it was running.
    pub fn set_speed_millis(&mut self, millis: i64, now: Instant) -> Result<(), ControlError> {
        if millis < 0 {
            return Err(ControlError::NegativeSpeed(millis));
        }

        let was_playing = self.playing;
        self.stop();
        self.speed = Duration::from_millis(millis as u64);
        if was_playing {
            self.start(now);
        }
        Ok(())
    }

    pub fn set_tick_count(&mut self, tick_count: i64) -> Result<(), ControlError> {
        if tick_count < 1 || tick_count > u32::MAX as i64 {
            return Err(ControlError::InvalidTickCount(tick_count));
        }
        self.tick_count = tick_count as u32;
        Ok(())
    }

    /// Step the model if playing and the delay has elapsed.
    ///
    /// Returns the executed step, or `None` if nothing was due. Stops playback
    /// when the model is exhausted.
    pub fn poll(&mut self, now: Instant, model: &mut ExecutionModel) -> Option<Step> {
        if !self.playing || now.saturating_duration_since(self.last_step) < self.speed {
            return None;
        }

        self.last_step = now;
        if model.can_step_forward() {
            Some(model.next())
        } else {
            self.stop();
            None
        }
    }

    /// Progress within the current step, `1..=tick_count`; 0 when paused
    pub fn current_tick(&self, now: Instant) -> u32 {
        if !self.playing {
            return 0;
        }
        if self.speed.is_zero() {
            return self.tick_count;
        }

        let elapsed = now.saturating_duration_since(self.last_step).as_nanos();
        let tick = elapsed * self.tick_count as u128 / self.speed.as_nanos();
        (tick as u32).saturating_add(1).min(self.tick_count)
    }

    /// Stop playback and reset the model
    pub fn reset(&mut self, model: &mut ExecutionModel) {
        self.stop();
        model.reset();
    }

    /// Stop playback and clear the model
    pub fn clear(&mut self, model: &mut ExecutionModel) {
        self.stop();
        model.clear();
    }
}

impl Default for AutoPlay {
    fn default() -> Self {
        Self::new(DEFAULT_SPEED, 1)
    }
}
