//! Sensor readings with per-metric sparklines, and the throughput panel.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

use crate::engine::Dashboard;
use crate::models::SensorMetric;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_CHART, COLOR_DIM};

const LABEL_WIDTH: u16 = 24;

pub fn render_sensors(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let block = Block::default()
        .title(" SENSORS ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(SensorMetric::ALL.iter().map(|_| Constraint::Length(1)))
        .split(inner);

    for (metric, row) in SensorMetric::ALL.iter().zip(rows.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
            .split(*row);

        let reading = Line::from(vec![
            Span::styled(format!("{:<12}", metric.label()), Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!("{} {}", dashboard.sensors().display(*metric), metric.unit()),
                Style::default().fg(COLOR_ACCENT),
            ),
        ]);
        frame.render_widget(Paragraph::new(reading), columns[0]);

        let values = dashboard.series().values(*metric);
        let width = columns[1].width as usize;
        let visible = &values[values.len().saturating_sub(width)..];
        let sparkline = Sparkline::default()
            .data(scale_for_sparkline(visible))
            .style(Style::default().fg(COLOR_CHART));
        frame.render_widget(sparkline, columns[1]);
    }
}

pub fn render_throughput(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let throughput = dashboard.throughput();
    let lines = vec![
        Line::from(vec![
            Span::styled("AQSA  ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!("{} kb/s", throughput.aqsa_label()),
                Style::default().fg(COLOR_ACCENT),
            ),
        ]),
        Line::from(vec![
            Span::styled("TAIP  ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!("{} kb/s", throughput.taip_label()),
                Style::default().fg(COLOR_ACCENT),
            ),
        ]),
        Line::from(Span::styled(
            throughput.updated_label(),
            Style::default().fg(COLOR_DIM),
        )),
    ];

    let block = Block::default()
        .title(" THROUGHPUT ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Map readings onto 0..=100 relative to the visible range. A flat series
/// sits at mid height.
pub fn scale_for_sparkline(values: &[f64]) -> Vec<u64> {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                0
            } else if max - min < f64::EPSILON {
                50
            } else {
                (((v - min) / (max - min)) * 100.0).round() as u64
            }
        })
        .collect()
}
