//! Connection lifecycle state machine.
//!
//! Driven only by lifecycle events reported by the push transport. The
//! machine never retries anything itself; it exists so the header can show
//! a status and the activity log records every transition.

use std::fmt;

use super::activity_log::LogLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Connected,
    Disconnected,
    Error,
    /// Reconnect attempts exhausted. Left only by a new attempt cycle.
    Failed,
}

impl ConnectionState {
    /// Status indicator text.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::Connected => "Connected",
            ConnectionState::Disconnected => "Disconnected",
            ConnectionState::Error => "Connection Error",
            ConnectionState::Failed => "Connection Failed",
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Transport lifecycle callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Connected,
    Disconnected { reason: String },
    ConnectError { message: String },
    /// A reconnect attempt is starting.
    Reconnecting { attempt: u32 },
    Reconnected { attempt: u32 },
    ReconnectError { message: String },
    ReconnectFailed,
}

/// Result of applying a lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: ConnectionState,
    pub to: ConnectionState,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionMachine {
    state: ConnectionState,
    reconnect_attempt: Option<u32>,
}

impl ConnectionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Attempt number of the reconnect cycle in progress, if any.
    pub fn reconnect_attempt(&self) -> Option<u32> {
        self.reconnect_attempt
    }

    /// Apply an event. Returns `None` when the event is ignored, which only
    /// happens for late error reports once the machine has failed.
    pub fn apply(&mut self, event: &LifecycleEvent) -> Option<Transition> {
        let (to, level, message) = match event {
            LifecycleEvent::Connected => (
                ConnectionState::Connected,
                LogLevel::Info,
                "Connected to GCS stream".to_string(),
            ),
            LifecycleEvent::Disconnected { reason } => (
                ConnectionState::Disconnected,
                LogLevel::Warning,
                format!("Disconnected from GCS stream: {}", reason),
            ),
            LifecycleEvent::ConnectError { message } => (
                ConnectionState::Error,
                LogLevel::Error,
                format!("Connection error: {}", message),
            ),
            LifecycleEvent::Reconnecting { attempt } => (
                ConnectionState::Connecting,
                LogLevel::Info,
                format!("Reconnecting (attempt {})...", attempt),
            ),
            LifecycleEvent::Reconnected { attempt } => (
                ConnectionState::Connected,
                LogLevel::Info,
                format!("Reconnected after {} attempts", attempt),
            ),
            LifecycleEvent::ReconnectError { message } => (
                ConnectionState::Error,
                LogLevel::Error,
                format!("Reconnection error: {}", message),
            ),
            LifecycleEvent::ReconnectFailed => (
                ConnectionState::Failed,
                LogLevel::Error,
                "Failed to reconnect after maximum attempts".to_string(),
            ),
        };

        let leaves_failed = matches!(
            event,
            LifecycleEvent::Connected
                | LifecycleEvent::Reconnecting { .. }
                | LifecycleEvent::Reconnected { .. }
        );
        if self.state == ConnectionState::Failed && !leaves_failed {
            tracing::debug!("Ignoring {:?} while connection is failed", event);
            return None;
        }

        self.reconnect_attempt = match event {
            LifecycleEvent::Reconnecting { attempt } => Some(*attempt),
            LifecycleEvent::ReconnectError { .. } => self.reconnect_attempt,
            _ => None,
        };

        let from = self.state;
        self.state = to;
        Some(Transition {
            from,
            to,
            level,
            message,
        })
    }
}
