//! Main TUI application state and logic

use crate::controller::AutoPlay;
use crate::engine::{ExecutionModel, Step};
use crate::ui::console::{ConsoleLog, SharedConsole};
use crate::ui::panes::{self, StatusRenderData};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Speed change per `+`/`-` press
const SPEED_STEP_MS: i64 = 100;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Operations,
    Structures,
    Console,
}

impl FocusedPane {
    /// Move focus to the next pane (operations -> console -> structures)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Operations => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Structures,
            FocusedPane::Structures => FocusedPane::Operations,
        }
    }
}

/// The main application state
pub struct App {
    /// The execution model being replayed
    pub model: ExecutionModel,

    /// Timed stepping state
    pub auto_play: AutoPlay,

    /// Messages and last batch, shared with the model as a listener
    pub console: Rc<RefCell<ConsoleLog>>,

    /// Name of the loaded recording
    pub title: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub operations_scroll: usize,
    pub console_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around a loaded model
    pub fn new(mut model: ExecutionModel, auto_play: AutoPlay, title: String) -> Self {
        let console = Rc::new(RefCell::new(ConsoleLog::new()));
        for warning in model.warnings() {
            console
                .borrow_mut()
                .push(warning.to_string(), crate::engine::MessageLevel::Severe);
        }
        model.add_listener(Box::new(SharedConsole(console.clone())));

        App {
            model,
            auto_play,
            console,
            status_message: format!("Loaded {}", title),
            title,
            focused_pane: FocusedPane::Operations,
            operations_scroll: 0,
            console_scroll: 0,
            should_quit: false,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            let was_playing = self.auto_play.is_playing();
            if let Some(step) = self.auto_play.poll(Instant::now(), &mut self.model) {
                self.report_step("Playing", &step);
                self.console_scroll = usize::MAX;
            } else if was_playing && !self.auto_play.is_playing() {
                self.status_message = "Playback complete".to_string();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        // Left column: Operations (top) | Console (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        let console = self.console.borrow();

        panes::render_operations_pane(
            frame,
            left_rows[0],
            self.model.operations(),
            self.model.index(),
            self.model.is_atomic(),
            self.focused_pane == FocusedPane::Operations,
            &mut self.operations_scroll,
        );

        panes::render_console_pane(
            frame,
            left_rows[1],
            &console,
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        panes::render_structures_pane(
            frame,
            columns[1],
            self.model.structures(),
            &console,
            self.focused_pane == FocusedPane::Structures,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &StatusRenderData {
                message: &self.status_message,
                index: self.model.index(),
                len: self.model.len(),
                atomic: self.model.is_atomic(),
                parallel: self.model.is_parallel(),
                is_playing: self.auto_play.is_playing(),
                speed: self.auto_play.speed(),
                tick: self.auto_play.current_tick(Instant::now()),
                tick_count: self.auto_play.tick_count(),
                has_warnings: !self.model.warnings().is_empty(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.auto_play.stop();
                let n = c.to_digit(10).unwrap_or(1);
                let mut stepped = 0;
                for _ in 0..n {
                    if !self.model.can_step_forward() {
                        break;
                    }
                    self.model.next();
                    stepped += 1;
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.console_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.auto_play.stop();
                self.step_backward();
            }
            KeyCode::Right => {
                self.auto_play.stop();
                self.step_forward();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Operations => {
                    self.operations_scroll = self.operations_scroll.saturating_sub(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_sub(1);
                }
                FocusedPane::Structures => {}
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Operations => {
                    self.operations_scroll = self.operations_scroll.saturating_add(1);
                }
                FocusedPane::Console => {
                    self.console_scroll = self.console_scroll.saturating_add(1);
                }
                FocusedPane::Structures => {}
            },
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.auto_play.toggle(Instant::now());
                    self.status_message = if self.auto_play.is_playing() {
                        "Playing...".to_string()
                    } else {
                        "Paused".to_string()
                    };
                }
            }
            KeyCode::Enter => {
                // Jump to end of execution
                self.auto_play.stop();
                let last = self.model.len() as isize - 1;
                let step = self.model.goto_index(last);
                self.report_step("Jumped to end", &step);
            }
            KeyCode::Backspace => {
                // Jump to start of execution
                self.auto_play.stop();
                self.model.rewind();
                self.console.borrow_mut().last_batch.clear();
                self.status_message = "Jumped to start".to_string();
            }
            KeyCode::Char('r') => {
                self.auto_play.reset(&mut self.model);
                self.console.borrow_mut().last_batch.clear();
                self.status_message = "Reset to first operation".to_string();
            }
            KeyCode::Char('a') => {
                let atomic = !self.model.is_atomic();
                let step = self.model.set_atomic_mode(atomic);
                let label = if atomic { "Atomic mode" } else { "Mixed mode" };
                self.report_step(label, &step);
            }
            KeyCode::Char('p') => {
                let parallel = !self.model.is_parallel();
                self.model.set_parallel_mode(parallel);
                self.status_message = if parallel {
                    "Grouped stepping".to_string()
                } else {
                    "Linear stepping".to_string()
                };
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_speed(-SPEED_STEP_MS),
            KeyCode::Char('-') => self.change_speed(SPEED_STEP_MS),
            _ => {}
        }
    }

    /// Step forward in execution
    fn step_forward(&mut self) {
        if !self.model.can_step_forward() {
            self.status_message = "Cannot step forward: end of recording".to_string();
            return;
        }
        let step = self.model.next();
        self.report_step("Stepped forward", &step);
        self.console_scroll = usize::MAX;
    }

    /// Step backward in execution
    fn step_backward(&mut self) {
        if !self.model.can_step_backward() {
            self.status_message = "Cannot step backward: too close to the start".to_string();
            return;
        }
        let step = self.model.previous();
        self.report_step("Stepped backward", &step);
    }

    /// `delta_ms` is added to the delay, so a negative delta plays faster
    fn change_speed(&mut self, delta_ms: i64) {
        let millis = self.auto_play.speed().as_millis() as i64 + delta_ms;
        match self.auto_play.set_speed_millis(millis, Instant::now()) {
            Ok(()) => self.status_message = format!("Delay {} ms", millis),
            Err(e) => self.status_message = format!("Error: {}", e),
        }
    }

    fn report_step(&mut self, action: &str, step: &Step) {
        self.status_message = match step.faults.first() {
            Some(fault) => format!("{}: {}", action, fault),
            None => format!("{}: ok", action),
        };
    }
}
