//! Key help, or the prompt of the current input mode.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::InputMode;
use crate::models::DisplayMode;

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_WARNING};

pub fn render_footer(frame: &mut Frame, area: Rect, mode: &InputMode, device_id: Option<&str>) {
    let line = match mode {
        InputMode::Normal => help_line(device_id),
        InputMode::ConfirmClear => Line::from(vec![Span::styled(
            "Clear ALL history on the ground station? (y/N)",
            Style::default()
                .fg(COLOR_WARNING)
                .add_modifier(Modifier::BOLD),
        )]),
        InputMode::DeviceEntry(buffer) => Line::from(vec![
            Span::styled("Device ID: ", Style::default().fg(COLOR_WARNING)),
            Span::styled(buffer.clone(), Style::default().fg(COLOR_ACCENT)),
            Span::styled("█", Style::default().fg(COLOR_ACCENT)),
            Span::styled("  Enter save · Esc cancel", Style::default().fg(COLOR_DIM)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn help_line(device_id: Option<&str>) -> Line<'static> {
    let key = |k: &str| Span::styled(k.to_string(), Style::default().fg(COLOR_ACCENT));
    let text = |t: &str| Span::styled(t.to_string(), Style::default().fg(COLOR_DIM));

    let modes = DisplayMode::ALL
        .iter()
        .enumerate()
        .map(|(i, mode)| format!("{}={}", i + 1, mode.as_str()))
        .collect::<Vec<_>>()
        .join(" ");

    Line::from(vec![
        key("q"),
        text(" quit  "),
        key("↑↓/Enter"),
        text(" select  "),
        key("l"),
        text(" live  "),
        key("r"),
        text(" reset  "),
        key("x"),
        text(" clear log  "),
        key("R"),
        text(" reload  "),
        key("C"),
        text(" clear history  "),
        key("d"),
        text(format!(" device [{}]  ", device_id.unwrap_or("none")).as_str()),
        text(&modes),
    ])
}
