//! # Records
//!
//! Best score per level. The round evaluator receives a [`RecordStore`] when
//! it is built and only touches it when a level is won.

use crate::{LevelMoverError, LevelMoverResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Best-score storage keyed by level id.
pub trait RecordStore {
    /// Stored best score for the level, `None` when the level has none.
    fn get_best(&self, level_id: &str) -> LevelMoverResult<Option<u32>>;

    /// Replaces the stored best score for the level.
    fn set_best(&mut self, level_id: &str, score: u32) -> LevelMoverResult<()>;
}

/// Record store that lives only as long as the process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRecordStore {
    records: BTreeMap<String, u32>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with the given records.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::{MemoryRecordStore, RecordStore};
    ///
    /// let store = MemoryRecordStore::with_records([("1", 1000)]);
    /// assert_eq!(store.get_best("1").unwrap(), Some(1000));
    /// assert_eq!(store.get_best("2").unwrap(), None);
    /// ```
    pub fn with_records<'a>(records: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|(id, score)| (id.to_string(), score))
                .collect(),
        }
    }

    pub fn records(&self) -> &BTreeMap<String, u32> {
        &self.records
    }

    /// Sum of all best scores.
    pub fn total(&self) -> u64 {
        self.records.values().map(|&score| score as u64).sum()
    }
}

impl RecordStore for MemoryRecordStore {
    fn get_best(&self, level_id: &str) -> LevelMoverResult<Option<u32>> {
        Ok(self.records.get(level_id).copied())
    }

    fn set_best(&mut self, level_id: &str, score: u32) -> LevelMoverResult<()> {
        self.records.insert(level_id.to_string(), score);
        Ok(())
    }
}

/// Record store persisted as a JSON object `{ "<level id>": score }`.
///
/// The file is read once when the store is opened and rewritten atomically
/// on every update. A missing file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    path: PathBuf,
    records: MemoryRecordStore,
}

impl JsonRecordStore {
    pub fn open(path: impl Into<PathBuf>) -> LevelMoverResult<Self> {
        let path = path.into();
        let records = match fs::read_to_string(&path) {
            Ok(json) => {
                let records: BTreeMap<String, u32> = serde_json::from_str(&json)?;
                info!("Loaded {} level records from {}", records.len(), path.display());
                MemoryRecordStore { records }
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                info!("No records at {}, starting fresh", path.display());
                MemoryRecordStore::new()
            }
            Err(error) => return Err(error.into()),
        };

        Ok(Self { path, records })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sum of all best scores, the level-set total.
    pub fn total(&self) -> u64 {
        self.records.total()
    }

    fn save(&self) -> LevelMoverResult<()> {
        let json = serde_json::to_string_pretty(self.records.records())?;
        write_text_atomic(&self.path, &json).map_err(|error| {
            LevelMoverError::RecordStore(format!(
                "failed to write {}: {}",
                self.path.display(),
                error
            ))
        })
    }
}

impl RecordStore for JsonRecordStore {
    fn get_best(&self, level_id: &str) -> LevelMoverResult<Option<u32>> {
        self.records.get_best(level_id)
    }

    fn set_best(&mut self, level_id: &str, score: u32) -> LevelMoverResult<()> {
        let previous = self.records.get_best(level_id)?;
        self.records.set_best(level_id, score)?;
        if let Err(error) = self.save() {
            // Keep memory and disk in agreement.
            match previous {
                Some(previous) => self.records.set_best(level_id, previous)?,
                None => {
                    self.records.records.remove(level_id);
                }
            }
            return Err(error);
        }
        Ok(())
    }
}

fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    fs::write(&tmp_path, text)?;
    if let Err(error) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("records.json");
    let tmp_name = format!("{file_name}.tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonRecordStore::open(dir.path().join("records.json")).unwrap();
        assert_eq!(store.get_best("1").unwrap(), None);
        assert_eq!(store.total(), 0);
    }

    #[test]
    fn test_json_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("records.json");

        let mut store = JsonRecordStore::open(&path).unwrap();
        store.set_best("1", 1420).unwrap();
        store.set_best("2", 1100).unwrap();
        assert!(!temp_path_for(&path).exists());

        let reopened = JsonRecordStore::open(&path).unwrap();
        assert_eq!(reopened.get_best("1").unwrap(), Some(1420));
        assert_eq!(reopened.total(), 2520);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonRecordStore::open(&path),
            Err(LevelMoverError::Serde(_))
        ));
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way of the file makes the rename fail.
        let path = dir.path().join("records.json");
        fs::create_dir(&path).unwrap();
        let mut store = JsonRecordStore {
            path,
            records: MemoryRecordStore::with_records([("1", 1000)]),
        };

        assert!(store.set_best("1", 1500).is_err());
        assert_eq!(store.get_best("1").unwrap(), Some(1000));
        assert!(store.set_best("2", 1500).is_err());
        assert_eq!(store.get_best("2").unwrap(), None);
    }
}
