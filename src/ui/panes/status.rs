//! Status bar rendering with keybindings and state indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub index: isize,
    pub len: usize,
    pub atomic: bool,
    pub parallel: bool,
    pub is_playing: bool,
    pub speed: Duration,
    /// Progress within the current auto-play step, `0` when paused
    pub tick: u32,
    pub tick_count: u32,
    pub has_warnings: bool,
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    // Left side: step info, modes and status
    let step_text = format!(" Step {}/{} ", data.index + 1, data.len);
    let mode_text = format!(
        " {} · {} · {}ms ",
        if data.atomic { "ATOMIC" } else { "MIXED" },
        if data.parallel { "GROUPED" } else { "LINEAR" },
        data.speed.as_millis()
    );

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if data.has_warnings {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            mode_text,
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.group_tag),
        ),
        Span::styled(
            "|",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let bindings = [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ↵ / ⌫ ", " end/start "),
        (" a ", " atomic "),
        (" p ", " group "),
        (" +/- ", " speed "),
        ("q", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in bindings.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    if let Some((text, color)) = indicator(data) {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// Right-most badge: playback progress, or where the cursor sits
fn indicator(data: &StatusRenderData) -> Option<(String, Color)> {
    let is_at_start = data.index < 0;
    let is_at_end = data.len > 0 && data.index + 1 >= data.len as isize;

    if data.is_playing {
        let text = if data.tick_count > 1 {
            format!(" ▶ PLAYING {}/{} ", data.tick, data.tick_count)
        } else {
            " ▶ PLAYING ".to_string()
        };
        Some((text, DEFAULT_THEME.secondary))
    } else if is_at_end {
        Some((" END ".to_string(), DEFAULT_THEME.error))
    } else if is_at_start {
        Some((" START ".to_string(), DEFAULT_THEME.success))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(is_playing: bool, tick: u32, tick_count: u32) -> StatusRenderData<'static> {
        StatusRenderData {
            message: "",
            index: 2,
            len: 10,
            atomic: false,
            parallel: true,
            is_playing,
            speed: Duration::from_millis(400),
            tick,
            tick_count,
            has_warnings: false,
        }
    }

    #[test]
    fn test_indicator_shows_tick_progress() {
        let (text, _) = indicator(&data(true, 3, 4)).unwrap();
        assert_eq!(text, " ▶ PLAYING 3/4 ");

        let (text, _) = indicator(&data(true, 1, 1)).unwrap();
        assert_eq!(text, " ▶ PLAYING ");

        assert!(indicator(&data(false, 0, 4)).is_none());
    }

    #[test]
    fn test_indicator_at_ends() {
        let mut at_end = data(false, 0, 1);
        at_end.index = 9;
        assert_eq!(indicator(&at_end).unwrap().0, " END ");

        let mut at_start = data(false, 0, 1);
        at_start.index = -1;
        assert_eq!(indicator(&at_start).unwrap().0, " START ");
    }
}
