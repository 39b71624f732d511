//! All-time best score persistence
//!
//! The record is a single JSON integer. A missing record reads as 0.
//! Writes are retried once, creating the destination directory first,
//! and a second failure is returned to the caller.

use std::io;
use std::path::{Path, PathBuf};

/// Default record file, relative to the working directory
pub const DEFAULT_STORE_FILE: &str = "side_high_score.json";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write high score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode high score: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Durable storage for the all-time best score
pub trait ScoreStore {
    /// Stored best, or 0 when there is no record
    fn load(&self) -> u64;

    /// Overwrite the stored best
    fn save(&mut self, value: u64) -> Result<(), StoreError>;
}

/// Record kept in a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_once(&self, json: &str) -> io::Result<()> {
        std::fs::write(&self.path, json)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> u64 {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No high score record at {}, starting from 0", self.path.display());
                return 0;
            }
            Err(e) => {
                log::warn!("Could not read {}: {}, treating record as 0", self.path.display(), e);
                return 0;
            }
        };

        match serde_json::from_str::<u64>(json.trim()) {
            Ok(score) => score,
            Err(e) => {
                log::warn!("Corrupt high score record in {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        let json = serde_json::to_string(&value)?;

        if let Err(first) = self.write_once(&json) {
            log::warn!(
                "High score write to {} failed ({}), retrying",
                self.path.display(),
                first
            );
            if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                // A failure here shows up again in the retry below
                let _ = std::fs::create_dir_all(parent);
            }
            self.write_once(&json).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        log::info!("High score {} saved to {}", value, self.path.display());
        Ok(())
    }
}

/// In-process store for tests and ephemeral runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    record: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: u64) -> Self {
        Self {
            record: Some(record),
            saves: 0,
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> u64 {
        self.record.unwrap_or(0)
    }

    fn save(&mut self, value: u64) -> Result<(), StoreError> {
        self.record = Some(value);
        self.saves += 1;
        Ok(())
    }
}
