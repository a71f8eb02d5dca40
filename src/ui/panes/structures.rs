//! Structures pane: each registered structure drawn as a bar chart
//!
//! Bars touched by the last executed batch are highlighted. Values are
//! shifted so the smallest one still gets a visible bar; the label on top of
//! each bar shows the real value, and empty slots show `_`.

use super::border_style;
use crate::structures::StructureRegistry;
use crate::ui::console::ConsoleLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

const BAR_GAP: u16 = 1;
const MAX_BAR_WIDTH: u16 = 9;

/// Render the structures pane
pub fn render_structures_pane(
    frame: &mut Frame,
    area: Rect,
    structures: &StructureRegistry,
    console: &ConsoleLog,
    is_focused: bool,
) {
    let identifiers = structures.identifiers();
    if identifiers.is_empty() {
        let block = Block::default()
            .title(" Structures ")
            .borders(Borders::ALL)
            .border_style(border_style(is_focused));
        let paragraph = Paragraph::new("(no structures)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Ratio(1, identifiers.len() as u32);
            identifiers.len()
        ])
        .split(area);

    for (identifier, row) in identifiers.into_iter().zip(rows.iter()) {
        let values = structures
            .get(identifier)
            .map(|s| s.values())
            .unwrap_or_default();
        render_structure(frame, *row, identifier, &values, console, is_focused);
    }
}

fn render_structure(
    frame: &mut Frame,
    area: Rect,
    identifier: &str,
    values: &[Option<i64>],
    console: &ConsoleLog,
    is_focused: bool,
) {
    let block = Block::default()
        .title(format!(" {} [{}] ", identifier, values.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let min = values.iter().flatten().copied().min().unwrap_or(0);
    let bars: Vec<Bar> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let color = if console.touched(identifier, i) {
                DEFAULT_THEME.touched_bar
            } else {
                DEFAULT_THEME.bar
            };
            let (height, text) = match value {
                Some(v) => (v.saturating_sub(min).unsigned_abs() + 1, v.to_string()),
                None => (0, "_".to_string()),
            };
            Bar::default()
                .value(height)
                .text_value(text)
                .label(Line::from(i.to_string()))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(DEFAULT_THEME.number)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(bar_width(area.width.saturating_sub(2), values.len()))
        .bar_gap(BAR_GAP)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Widest bar that fits `count` bars (with gaps) into `inner_width` columns
fn bar_width(inner_width: u16, count: usize) -> u16 {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    (inner_width.saturating_add(BAR_GAP) / count)
        .saturating_sub(BAR_GAP)
        .clamp(1, MAX_BAR_WIDTH)
}
