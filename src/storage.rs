//! Best score persistence
//!
//! The best score is kept in a small JSON file, `{"best_score": N}`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: u32,
}

/// Reads and writes the best score file
#[derive(Debug, Clone)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored best score, 0 when no file exists yet
    pub fn load(&self) -> Result<u32, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let record: BestScoreRecord = serde_json::from_str(&contents)?;
        Ok(record.best_score)
    }

    /// Like `load`, but a broken file only costs the stored value
    pub fn load_or_default(&self) -> u32 {
        self.load().unwrap_or_else(|e| {
            log::warn!("Failed to read best score from {}: {}", self.path.display(), e);
            0
        })
    }

    pub fn save(&self, best_score: u32) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(&BestScoreRecord { best_score })?;
        fs::write(&self.path, json)?;
        log::debug!("Saved best score {} to {}", best_score, self.path.display());
        Ok(())
    }
}

/// Error reading or writing the best score
#[derive(Debug)]
pub enum StorageError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// The file is not valid JSON or has the wrong shape
    Json(serde_json::Error),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("termsnake-storage-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn missing_file_is_zero() {
        let store = BestScoreStore::new(temp_path("missing.json"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn save_then_load() {
        let path = temp_path("saved.json");
        let store = BestScoreStore::new(&path);
        store.save(42).unwrap();
        assert_eq!(store.load().unwrap(), 42);
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"best_score":42}"#);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let store = BestScoreStore::new(&path);
        assert!(matches!(store.load(), Err(StorageError::Json(_))));
        assert_eq!(store.load_or_default(), 0);
        fs::remove_file(&path).unwrap();
    }
}
