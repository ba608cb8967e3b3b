//! Recent detections list.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::engine::{describe, RecentEntry, RecentRing};
use crate::models::format_clock_or_placeholder;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SELECTED};

pub fn render_recent(frame: &mut Frame, area: Rect, recent: &RecentRing, cursor: usize) {
    let title = format!(" RECENT ({}/{}) ", recent.len(), recent.capacity());
    let visible_rows = area.height.saturating_sub(2) as usize;
    // Keep the cursor on screen.
    let skip = (cursor + 1).saturating_sub(visible_rows);

    let lines: Vec<Line> = recent
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible_rows)
        .map(|(index, entry)| entry_line(entry, index == cursor))
        .collect();

    let lines = if lines.is_empty() {
        vec![Line::from(Span::styled(
            "No detections yet",
            Style::default().fg(COLOR_DIM),
        ))]
    } else {
        lines
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn entry_line(entry: &RecentEntry, highlighted: bool) -> Line<'static> {
    let marker = if entry.active { "▶ " } else { "  " };
    let mut style = Style::default().fg(if entry.active {
        COLOR_SELECTED
    } else {
        COLOR_ACCENT
    });
    if highlighted {
        style = style.add_modifier(Modifier::REVERSED);
    }

    Line::from(vec![
        Span::styled(marker, Style::default().fg(COLOR_SELECTED)),
        Span::styled(
            format!("{} ", format_clock_or_placeholder(entry.event.captured_at)),
            Style::default().fg(COLOR_DIM),
        ),
        Span::styled(
            format!("{:<6} {}", entry.event.category.label(), describe(&entry.event)),
            style,
        ),
    ])
}
