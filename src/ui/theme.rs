//! Color theme constants for the dashboard.

use ratatui::style::Color;

use crate::engine::{ConnectionState, LogLevel};

/// Panel borders
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Panel titles and highlighted values
pub const COLOR_ACCENT: Color = Color::White;

/// Secondary text (labels, timestamps, placeholders)
pub const COLOR_DIM: Color = Color::DarkGray;

/// Active slots and healthy status
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Selected row in the recent list
pub const COLOR_SELECTED: Color = Color::Cyan;

/// Warnings and pending prompts
pub const COLOR_WARNING: Color = Color::Yellow;

/// Errors
pub const COLOR_ERROR: Color = Color::Red;

/// Chart lines
pub const COLOR_CHART: Color = Color::Rgb(0, 122, 204);

pub fn connection_color(state: ConnectionState) -> Color {
    match state {
        ConnectionState::Connected => COLOR_ACTIVE,
        ConnectionState::Connecting => COLOR_WARNING,
        ConnectionState::Disconnected => COLOR_DIM,
        ConnectionState::Error | ConnectionState::Failed => COLOR_ERROR,
    }
}

pub fn log_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Info => COLOR_ACCENT,
        LogLevel::Success => COLOR_ACTIVE,
        LogLevel::Warning => COLOR_WARNING,
        LogLevel::Error => COLOR_ERROR,
    }
}
