//! Error handling for the ground station dashboard.
//!
//! - **Error Categories**: classification used to pick the recovery hint
//! - **Domain errors**: network, storage
//! - **Unified Error Type**: `GcsError`
//! - **Result Type Alias**: `GcsResult<T>`
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, timeout | Yes |
//! | Server | Backend 5xx | Yes |
//! | Client | Unexpected response shape | No |
//! | User | Invalid operator input, 4xx | No |
//! | System | State directory / files | No |
//!
//! Malformed push payloads are deliberately *not* errors: they are
//! normalized into display sentinels by [`crate::engine::normalizer`].

mod category;
mod gcs_error;
mod network;
mod storage;

pub use category::ErrorCategory;
pub use gcs_error::GcsError;
pub use network::NetworkError;
pub use storage::StorageError;

/// Type alias for Results using GcsError.
pub type GcsResult<T> = Result<T, GcsError>;
