//! Unified error type for the dashboard.

use std::fmt;

use super::category::ErrorCategory;
use super::network::NetworkError;
use super::storage::StorageError;

/// Unified error type.
///
/// Every fallible REST call, persistence operation, and operator command
/// returns `GcsError` so the event loop can log one user-facing message
/// regardless of where the failure came from.
#[derive(Debug)]
pub enum GcsError {
    /// No usable HTTP response.
    Network(NetworkError),

    /// Non-2xx response from the ground station.
    Api { status: u16, message: String },

    /// Response body could not be decoded.
    Decode { endpoint: String, message: String },

    /// Local persistence failure.
    Storage(StorageError),

    /// Invalid operator input.
    User(String),
}

impl GcsError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            GcsError::Network(_) => ErrorCategory::Network,
            GcsError::Api { status, .. } if *status >= 500 => ErrorCategory::Server,
            GcsError::Api { .. } => ErrorCategory::User,
            GcsError::Decode { .. } => ErrorCategory::Client,
            GcsError::Storage(_) => ErrorCategory::System,
            GcsError::User(_) => ErrorCategory::User,
        }
    }

    /// Check if re-triggering the operation may succeed.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            GcsError::Network(err) => err.user_message(),
            GcsError::Api { message, .. } => message.clone(),
            GcsError::Decode { endpoint, .. } => {
                format!("Unexpected response from {}", endpoint)
            }
            GcsError::Storage(err) => err.to_string(),
            GcsError::User(message) => message.clone(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            GcsError::Network(err) => err.error_code(),
            GcsError::Api { .. } => "E_API_STATUS",
            GcsError::Decode { .. } => "E_API_DECODE",
            GcsError::Storage(err) => err.error_code(),
            GcsError::User(_) => "E_USER_INPUT",
        }
    }

    /// Get the recovery hint for this error.
    pub fn recovery_hint(&self) -> &'static str {
        self.category().recovery_hint()
    }
}

impl fmt::Display for GcsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GcsError::Network(err) => write!(f, "{}", err),
            GcsError::Api { status, message } => write!(f, "HTTP {}: {}", status, message),
            GcsError::Decode { endpoint, message } => {
                write!(f, "Failed to decode {} response: {}", endpoint, message)
            }
            GcsError::Storage(err) => write!(f, "{}", err),
            GcsError::User(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for GcsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GcsError::Network(err) => Some(err),
            GcsError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NetworkError> for GcsError {
    fn from(err: NetworkError) -> Self {
        GcsError::Network(err)
    }
}

impl From<StorageError> for GcsError {
    fn from(err: StorageError) -> Self {
        GcsError::Storage(err)
    }
}
