// replaytty: step through recorded algorithm operations in the terminal

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::info;
use tracing_subscriber::EnvFilter;

use replaytty::cli::Cli;
use replaytty::ui::App;

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so without a log file nothing is installed and
/// events are dropped. Headless runs log to stderr.
fn init_logging(log_file: Option<&Path>, headless: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if headless => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.log_file.as_deref(), cli.headless)?;

    let config = cli.to_config();
    config.validate().context("invalid arguments")?;

    let mut model = config.build_model();
    info!(demo = %config.demo, operations = model.len(), "recording ready");

    if cli.headless {
        let stdout = io::stdout();
        replaytty::headless::run(&mut model, &mut stdout.lock())?;
        return Ok(());
    }

    let auto_play = config.auto_play()?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(model, auto_play, config.demo.to_string());
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}
