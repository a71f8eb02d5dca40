//! Console pane: messages from the recording and faults from the engine

use super::border_style;
use crate::engine::MessageLevel;
use crate::ui::console::ConsoleLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the console pane
pub fn render_console_pane(
    frame: &mut Frame,
    area: Rect,
    console: &ConsoleLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if console.lines.is_empty() {
        let paragraph = Paragraph::new("(no messages)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = console.lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        *scroll_offset = (*scroll_offset).min(total_items - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let items: Vec<ListItem> = console
        .lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| {
            let (prefix, color) = match line.level {
                MessageLevel::Normal => ("", DEFAULT_THEME.fg),
                MessageLevel::Severe => ("✗ ", DEFAULT_THEME.error),
            };
            ListItem::new(format!("{}{}", prefix, line.text)).style(Style::default().fg(color))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
