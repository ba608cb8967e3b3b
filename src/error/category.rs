//! Error category classification.
//!
//! Categories drive how the dashboard surfaces a failure: whether the
//! operator can simply re-trigger the action or has to fix something first.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout. Re-triggering usually helps.
    Network,

    /// Ground station backend rejected or failed the request (non-2xx).
    Server,

    /// Response body did not have the expected shape.
    Client,

    /// Operator input is invalid (empty device id, unknown display mode).
    User,

    /// Local filesystem / persistence problems.
    System,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
        }
    }

    /// Suggested recovery action shown next to the error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check the link to the ground station and try again.",
            ErrorCategory::Server => "The ground station reported a problem. Try again shortly.",
            ErrorCategory::Client => "The ground station sent an unexpected response.",
            ErrorCategory::User => "Correct the input and try again.",
            ErrorCategory::System => "Check that the state directory is writable.",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
