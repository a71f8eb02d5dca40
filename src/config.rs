//! Runtime configuration for the replay front ends

use crate::controller::{AutoPlay, DEFAULT_SPEED};
use crate::demo::Demo;
use crate::engine::ExecutionModel;
use crate::error::{ReplayError, Result};
use std::time::Duration;

/// Settings the binary builds its model and controller from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Name given to the execution model (shows up in logs)
    pub model_name: String,

    /// Recording to load
    pub demo: Demo,

    /// Initial array contents; `None` uses the demo's default input
    pub values: Option<Vec<i64>>,

    /// Execute whole groups per step
    pub parallel: bool,

    /// Start in atomic granularity
    pub atomic: bool,

    /// Delay between auto-play steps in milliseconds
    pub speed_millis: i64,

    /// Animation ticks per step
    pub tick_count: i64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig {
            model_name: "replay".to_string(),
            demo: Demo::BubbleSort,
            values: None,
            parallel: true,
            atomic: false,
            speed_millis: DEFAULT_SPEED.as_millis() as i64,
            tick_count: 1,
        }
    }
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.model_name.trim().is_empty() {
            return Err(ReplayError::config("model name cannot be empty"));
        }
        if let Some(values) = &self.values {
            if values.is_empty() {
                return Err(ReplayError::config("at least one input value is required"));
            }
        }
        // Speed and tick count are checked by the controller itself
        self.auto_play()?;
        Ok(())
    }

    /// Build the execution model with the configured modes and demo loaded
    pub fn build_model(&self) -> ExecutionModel {
        let mut model = ExecutionModel::with_modes(&self.model_name, self.parallel, self.atomic);
        let (structures, operations) = self.demo.record(self.values.as_deref());
        model.load(structures, operations);
        model
    }

    /// Build the auto-play controller, rejecting invalid timing settings
    pub fn auto_play(&self) -> Result<AutoPlay> {
        let mut play = AutoPlay::new(DEFAULT_SPEED, 1);
        play.set_speed_millis(self.speed_millis, std::time::Instant::now())?;
        play.set_tick_count(self.tick_count)?;
        Ok(play)
    }

    pub fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_millis.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ControlError;

    #[test]
    fn test_default_is_valid() {
        let config = ReplayConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn test_negative_speed_rejected() {
        let config = ReplayConfig {
            speed_millis: -1,
            ..ReplayConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ReplayError::Control(ControlError::NegativeSpeed(-1)))
        ));
    }

    #[test]
    fn test_empty_values_rejected() {
        let config = ReplayConfig {
            values: Some(Vec::new()),
            ..ReplayConfig::default()
        };
        assert!(matches!(config.validate(), Err(ReplayError::Config(_))));
    }

    #[test]
    fn test_build_model_uses_modes() {
        let config = ReplayConfig {
            parallel: false,
            atomic: true,
            values: Some(vec![2, 1]),
            ..ReplayConfig::default()
        };
        let model = config.build_model();
        assert!(!model.is_parallel());
        assert!(model.is_atomic());
        assert_eq!(model.index(), -1);
        assert!(!model.is_empty());
    }
}
