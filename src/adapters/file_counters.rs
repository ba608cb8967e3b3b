//! File-based counter store.
//!
//! Counters live in `<state_dir>/counters.json` (by default
//! `~/.gcs/counters.json`) as `{"sensorUpdateCount": n, "targetDetectionCount": m}`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::traits::{CounterSnapshot, CounterStore};

/// The counters file name.
const COUNTERS_FILE: &str = "counters.json";

#[derive(Debug, Clone)]
pub struct FileCounterStore {
    path: PathBuf,
}

impl FileCounterStore {
    /// Store counters inside `state_dir`.
    pub fn new(state_dir: impl AsRef<Path>) -> Self {
        Self {
            path: state_dir.as_ref().join(COUNTERS_FILE),
        }
    }

    /// Get the path to the counters file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterStore for FileCounterStore {
    fn load(&self) -> Result<CounterSnapshot, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(CounterSnapshot::default()),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, snapshot: &CounterSnapshot) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StorageError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, snapshot)
            .map_err(|e| write_err(std::io::Error::new(ErrorKind::Other, e)))?;
        writer.flush().map_err(write_err)
    }
}
