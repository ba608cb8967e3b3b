//! Top bar: title, connection status, record count, station version.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;

use super::theme::{connection_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};

pub fn render_header<H: HttpClient + Clone + 'static>(frame: &mut Frame, area: Rect, app: &App<H>) {
    let dashboard = &app.dashboard;
    let state = dashboard.connection();

    let mut spans = vec![
        Span::styled(
            "UAV GCS",
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  ", Style::default().fg(COLOR_DIM)),
        Span::styled("● ", Style::default().fg(connection_color(state))),
        Span::styled(state.label(), Style::default().fg(connection_color(state))),
        Span::styled("  │  ", Style::default().fg(COLOR_DIM)),
        Span::raw(dashboard.counters().records_label()),
        Span::styled("  │  ", Style::default().fg(COLOR_DIM)),
        Span::styled(
            dashboard.sensors().last_update_label(),
            Style::default().fg(COLOR_DIM),
        ),
    ];

    if let Some(health) = dashboard.health() {
        spans.push(Span::styled("  │  ", Style::default().fg(COLOR_DIM)));
        spans.push(Span::styled(
            format!("{} v{}", health.service, health.version),
            Style::default().fg(COLOR_DIM),
        ));
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
