//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`operations`]: the active operation sequence with the current position
//! - [`structures`]: one bar chart per registered structure
//! - [`console`]: messages and faults reported by the model
//! - [`status`]: status bar with keybindings and execution state
//!
//! Each pane module exports a single stateless `render_*` function; scroll
//! offsets live in [`App`](crate::ui::App) and are passed in by reference.

pub mod console;
pub mod operations;
pub mod status;
pub mod structures;

pub use console::render_console_pane;
pub use operations::render_operations_pane;
pub use status::{render_status_bar, StatusRenderData};
pub use structures::render_structures_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

/// Border style shared by every pane
pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Clamp `scroll` so that `selected` stays inside a window of `height` rows
pub(crate) fn follow_selection(scroll: &mut usize, selected: Option<usize>, total: usize, height: usize) {
    let height = height.max(1);
    if let Some(selected) = selected {
        if selected < *scroll {
            *scroll = selected;
        } else if selected >= *scroll + height {
            *scroll = selected + 1 - height;
        }
    }
    *scroll = (*scroll).min(total.saturating_sub(height));
}
