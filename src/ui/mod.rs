//! Terminal rendering.
//!
//! Everything here is a pure function of [`App`] state; drawing never
//! mutates the dashboard.
//!
//! ```text
//! ┌ header ───────────────────────────────────────────┐
//! ├ sensors ───────────┬ current frame ───────────────┤
//! │                    │                              │
//! ├ throughput ────────┼ recent ──────────────────────┤
//! ├ activity log ──────┴──────────────────────────────┤
//! └ footer ───────────────────────────────────────────┘
//! ```

mod footer;
mod frame_panel;
mod header;
mod logs;
mod recent;
mod sensors;
pub mod theme;

pub use sensors::scale_for_sparkline;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;
use crate::traits::HttpClient;

const LOG_HEIGHT: u16 = 8;

/// Draw the whole dashboard.
pub fn render<H: HttpClient + Clone + 'static>(frame: &mut Frame, app: &App<H>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render_header(frame, rows[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(columns[0]);
    sensors::render_sensors(frame, left[0], &app.dashboard);
    sensors::render_throughput(frame, left[1], &app.dashboard);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(columns[1]);
    frame_panel::render_frame_panel(frame, right[0], &app.dashboard);
    recent::render_recent(frame, right[1], app.dashboard.recent(), app.cursor);

    logs::render_logs(frame, rows[2], app.dashboard.log());
    footer::render_footer(frame, rows[3], &app.mode, app.device_id.as_deref());
}
