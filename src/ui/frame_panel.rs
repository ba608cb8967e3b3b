//! Current frame: header, the three category slots, preview status.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::engine::{Dashboard, PreviewSource};

use super::theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM};

pub fn render_frame_panel(frame: &mut Frame, area: Rect, dashboard: &Dashboard) {
    let rendered = dashboard.frame().render();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(rendered.time, Style::default().fg(COLOR_DIM)),
            Span::raw(" "),
            Span::styled(
                rendered.count,
                Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    for slot in &rendered.slots {
        let (marker, color) = if slot.active {
            ("■", COLOR_ACTIVE)
        } else {
            ("□", COLOR_DIM)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", marker), Style::default().fg(color)),
            Span::styled(
                format!("{:<6}", slot.label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(slot.details.clone(), Style::default().fg(color)),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(preview_line(dashboard));

    let block = Block::default()
        .title(" CURRENT FRAME ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn preview_line(dashboard: &Dashboard) -> Line<'static> {
    let source = match dashboard.frame().preview() {
        PreviewSource::Live => "live feed".to_string(),
        PreviewSource::Detection(url) => url.clone(),
    };
    let image = dashboard
        .preview_image()
        .map(|info| info.summary())
        .unwrap_or_else(|| "no image".to_string());

    let mut spans = vec![
        Span::styled("Image: ", Style::default().fg(COLOR_DIM)),
        Span::raw(image),
        Span::styled(format!("  ({})", source), Style::default().fg(COLOR_DIM)),
    ];
    if dashboard.frame().preview() != &PreviewSource::Live {
        if let Some(live) = dashboard.live_image() {
            spans.push(Span::styled("  Live: ", Style::default().fg(COLOR_DIM)));
            spans.push(Span::raw(live.summary()));
        }
    }
    Line::from(spans)
}
