//! Field device display modes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What the field device shows on its own screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Default,
    Ip,
    Targets,
    Temp,
    Sensors,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 5] = [
        DisplayMode::Default,
        DisplayMode::Ip,
        DisplayMode::Targets,
        DisplayMode::Temp,
        DisplayMode::Sensors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Default => "default",
            DisplayMode::Ip => "ip",
            DisplayMode::Targets => "targets",
            DisplayMode::Temp => "temp",
            DisplayMode::Sensors => "sensors",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DisplayMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s.trim())
            .ok_or_else(|| {
                let valid: Vec<&str> = DisplayMode::ALL.iter().map(|m| m.as_str()).collect();
                format!("Invalid mode. Must be one of: {}", valid.join(", "))
            })
    }
}

/// Body of `POST /api/device/{id}/display`.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayCommand {
    pub mode: DisplayMode,
}
