//! Named save slots: a byte-level key-value boundary for saved plays.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid slot name: {0:?}")]
    InvalidSlot(String),
}

pub trait SlotStore {
    fn write(&mut self, slot: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// `Ok(None)` when the slot has never been written.
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError>;

    fn slots(&self) -> Result<Vec<String>, StorageError>;
}

/// Slot names become file names, so only `[A-Za-z0-9_-]` is accepted.
fn check_slot(slot: &str) -> Result<(), StorageError> {
    let ok = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: BTreeMap<String, Vec<u8>>,
}

impl SlotStore for MemoryStore {
    fn write(&mut self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        check_slot(slot)?;
        self.slots.insert(slot.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        check_slot(slot)?;
        Ok(self.slots.get(slot).cloned())
    }

    fn slots(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.slots.keys().cloned().collect())
    }
}

/// One `<slot>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        check_slot(slot)?;
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

impl SlotStore for DirStore {
    fn write(&mut self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path(slot)?;
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "slot written");
        Ok(())
    }

    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path(slot)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn slots(&self) -> Result<Vec<String>, StorageError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut out = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    out.push(stem.to_string());
                }
            }
        }
        out.sort();
        Ok(out)
    }
}
