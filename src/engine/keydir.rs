//! caskdb - KeyDir (In-Memory Key Directory)
//! Maps every live key to the on-disk location of its current value.
//! The KeyDir is never persisted; it is rebuilt from the log files
//! each time a cask is opened.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::types::{Key, Record};

/// Location of a key's current value on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyDirEntry {
    /// Path of the log file containing the value.
    pub file_id: PathBuf,
    /// Byte offset of the value payload within `file_id`.
    pub value_offset: u64,
    /// Size of the value in bytes.
    pub value_size: u64,
    /// Timestamp of the record, for last-write-wins ordering on replay.
    pub timestamp: i64,
}

/// In-memory index from key to current value location.
/// Holds at most one entry per key: the most recently written,
/// non-tombstoned value across all replayed records.
#[derive(Debug, Default)]
pub struct KeyDir {
    entries: HashMap<Key, KeyDirEntry>,
}

impl KeyDir {
    /// Create a new, empty KeyDir.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value location for a key.
    pub fn get(&self, key: &[u8]) -> Option<&KeyDirEntry> {
        self.entries.get(key)
    }

    /// Insert or replace the entry for a key.
    pub fn insert(&mut self, key: Key, entry: KeyDirEntry) {
        self.entries.insert(key, entry);
    }

    /// Remove the entry for a key, if any.
    pub fn remove(&mut self, key: &[u8]) -> Option<KeyDirEntry> {
        self.entries.remove(key)
    }

    /// Check whether a key is currently live.
    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns every live key, in no particular order.
    pub fn keys(&self) -> Vec<Key> {
        self.entries.keys().cloned().collect()
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no keys are live.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold one replayed record into the index.
    ///
    /// `record_start` is the byte offset of the record within `file_id`.
    /// Records older than (or tied with) the existing entry are skipped,
    /// so replay order breaks timestamp ties first-writer-wins. A
    /// tombstone removes the key; a later record with a newer timestamp
    /// may legitimately resurrect it.
    pub fn replay(&mut self, file_id: &Path, record: &Record, record_start: u64) {
        if let Some(existing) = self.entries.get(&record.key) {
            if existing.timestamp >= record.timestamp {
                return;
            }
        }

        if record.is_tombstone() {
            self.entries.remove(&record.key);
            return;
        }

        self.entries.insert(
            record.key.clone(),
            KeyDirEntry {
                file_id: file_id.to_path_buf(),
                value_offset: record_start + record.value_offset(),
                value_size: record.value.len() as u64,
                timestamp: record.timestamp,
            },
        );
    }
}
