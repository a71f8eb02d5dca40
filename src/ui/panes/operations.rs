//! Operations pane: the active sequence with the current position highlighted

use super::{border_style, follow_selection};
use crate::operation::Operation;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the operations pane.
///
/// `current` is the model index (`-1` before the first operation).
pub fn render_operations_pane(
    frame: &mut Frame,
    area: Rect,
    operations: &[Operation],
    current: isize,
    atomic: bool,
    is_focused: bool,
    scroll: &mut usize,
) {
    let title = if atomic {
        format!(" Operations · atomic ({}) ", operations.len())
    } else {
        format!(" Operations · mixed ({}) ", operations.len())
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if operations.is_empty() {
        let paragraph = Paragraph::new("(no operations)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let selected = usize::try_from(current).ok();
    follow_selection(scroll, selected, operations.len(), visible_height);

    let number_width = operations.len().to_string().len();
    let lines: Vec<Line> = operations
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height.max(1))
        .map(|(i, op)| operation_line(i, op, selected == Some(i), number_width))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn operation_line(index: usize, op: &Operation, is_current: bool, width: usize) -> Line<'static> {
    let base = if is_current {
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let marker = if is_current { "▶ " } else { "  " };
    let text_color = if op.is_composite() {
        DEFAULT_THEME.composite
    } else {
        DEFAULT_THEME.fg
    };

    let mut spans = vec![
        Span::styled(marker, base.fg(DEFAULT_THEME.success)),
        Span::styled(
            format!("{:>width$} ", index, width = width),
            base.fg(DEFAULT_THEME.comment),
        ),
    ];
    if op.is_grouped() {
        spans.push(Span::styled(
            format!("g{} ", op.group),
            base.fg(DEFAULT_THEME.group_tag),
        ));
    }
    spans.push(Span::styled(op.to_string(), base.fg(text_color)));
    if op.is_composite() {
        spans.push(Span::styled(
            format!(" ×{}", op.atomic_step_count),
            base.fg(DEFAULT_THEME.comment),
        ));
    }

    Line::from(spans)
}
