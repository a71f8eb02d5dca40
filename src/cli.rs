use crate::config::ReplayConfig;
use crate::demo::Demo;
use clap::Parser;
use std::path::PathBuf;

/// Replay recorded algorithm operations step by step
#[derive(Parser, Debug)]
#[command(name = "replaytty")]
#[command(about = "Step forward, backward and across granularities through an algorithm recording")]
#[command(version)]
pub struct Cli {
    /// Built-in recording to replay
    #[arg(short, long, value_enum, default_value = "bubble-sort")]
    pub demo: Demo,

    /// Comma-separated input values for the demo (e.g. 5,2,8,1)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    pub values: Option<Vec<i64>>,

    /// Start in atomic mode (composite operations expanded)
    #[arg(long)]
    pub atomic: bool,

    /// Execute one operation per step instead of whole groups
    #[arg(long)]
    pub linear: bool,

    /// Delay between auto-play steps in milliseconds
    #[arg(long, default_value_t = 1000, allow_negative_numbers = true)]
    pub speed: i64,

    /// Animation ticks per auto-play step
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ticks: i64,

    /// Write logs to this file (the TUI discards logs otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print every step to stdout instead of starting the TUI
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn to_config(&self) -> ReplayConfig {
        ReplayConfig {
            demo: self.demo,
            values: self.values.clone(),
            parallel: !self.linear,
            atomic: self.atomic,
            speed_millis: self.speed,
            tick_count: self.ticks,
            ..ReplayConfig::default()
        }
    }
}
