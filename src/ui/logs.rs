use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::engine::ActivityLog;

use super::theme::{log_color, COLOR_BORDER};

/// Newest entries at the bottom, older ones scroll off the top.
pub fn render_logs(frame: &mut Frame, area: Rect, log: &ActivityLog) {
    let rows = area.height.saturating_sub(2) as usize;
    let skip = log.len().saturating_sub(rows);

    let lines: Vec<Line> = log
        .entries()
        .skip(skip)
        .map(|entry| {
            Line::from(Span::styled(
                entry.render(),
                Style::default().fg(log_color(entry.level)),
            ))
        })
        .collect();

    let block = Block::default()
        .title(" ACTIVITY LOG ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
