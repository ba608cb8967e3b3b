//! Local persistence errors (counter store).

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing persisted dashboard state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,

    #[error("Failed to create state directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt state file {path:?}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::NoHomeDirectory => "E_STORE_HOME",
            StorageError::CreateDir { .. } => "E_STORE_MKDIR",
            StorageError::Read { .. } => "E_STORE_READ",
            StorageError::Write { .. } => "E_STORE_WRITE",
            StorageError::Corrupt { .. } => "E_STORE_CORRUPT",
        }
    }
}
