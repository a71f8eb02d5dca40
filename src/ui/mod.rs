//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, pane focus, auto-play
//! - **[`console`]** — the listener that collects messages and the last batch
//! - **[`panes`]** — stateless render functions for each visible pane (operations,
//!   structures, console, status bar)
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with an
//! [`ExecutionModel`] and call [`App::run`] to start the event loop.
//!
//! [`ExecutionModel`]: crate::engine::ExecutionModel
//! [`App::run`]: app::App::run

pub mod app;
pub mod console;
pub mod panes;
pub mod theme;

pub use app::App;
