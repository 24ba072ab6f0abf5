//! caskdb - Storage Engine Module
//! Top-level module for the cask storage engine components.

pub mod codec;
pub mod keydir;
pub mod log;
pub mod recovery;

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};

use crate::config::Config;
use crate::error::{CaskError, Result};
use crate::types::{Key, Record, Value};

use self::keydir::{KeyDir, KeyDirEntry};
use self::log::LogWriter;

/// The core cask storage engine.
/// Coordinates the KeyDir and the append-only log writer to provide a
/// durable key-value store in the Bitcask style.
///
/// A `Cask` is single-threaded by contract: the KeyDir and the active
/// file handle are unsynchronized, so concurrent access from multiple
/// threads must be serialized by an external lock.
pub struct Cask {
    /// In-memory index from key to current value location.
    key_dir: KeyDir,
    /// Append-only writer for this session's log file.
    writer: LogWriter,
    /// Engine configuration.
    config: Config,
}

impl Cask {
    /// Open a new or existing cask rooted at the configured directory.
    ///
    /// Existing log files in the directory are replayed to rebuild the
    /// KeyDir, then a fresh log file is created for this session.
    pub fn open(config: Config) -> Result<Self> {
        config.ensure_dirs()?;

        let key_dir = recovery::rebuild_keydir(&config.data_dir)?;
        let writer = LogWriter::create(&config.data_dir, config.sync_writes)?;

        ::log::info!(
            "Cask opened at {:?} ({} keys recovered, active file {:?})",
            config.data_dir,
            key_dir.len(),
            writer.path()
        );

        Ok(Self {
            key_dir,
            writer,
            config,
        })
    }

    /// Store a key-value pair.
    /// The write path: log file (disk) -> KeyDir (memory). The record is
    /// appended and flushed before the index is updated, so the KeyDir
    /// never points at data that is not on disk.
    pub fn put(&mut self, key: Key, value: Value) -> Result<()> {
        let record = Record::put(key, value);
        let value_offset = self.writer.append(&record)?;

        self.key_dir.insert(
            record.key,
            KeyDirEntry {
                file_id: self.writer.path().to_path_buf(),
                value_offset,
                value_size: record.value.len() as u64,
                timestamp: record.timestamp,
            },
        );
        Ok(())
    }

    /// Retrieve the value associated with a key.
    ///
    /// The KeyDir names which file holds the value (possibly one written
    /// by an earlier session), and the read is a direct seek into it,
    /// independent of the append-only writer.
    pub fn get(&self, key: &[u8]) -> Result<Value> {
        let entry = self.key_dir.get(key).ok_or(CaskError::KeyNotFound)?;

        let mut file = File::open(&entry.file_id)?;
        file.seek(SeekFrom::Start(entry.value_offset))?;

        let mut value = vec![0u8; entry.value_size as usize];
        file.read_exact(&mut value)?;
        Ok(value)
    }

    /// Delete a key.
    ///
    /// A no-op if the key is absent. Otherwise a tombstone record is
    /// appended so the deletion survives replay, and the key is removed
    /// from the KeyDir so subsequent gets fail immediately.
    pub fn delete(&mut self, key: Key) -> Result<()> {
        if !self.key_dir.contains_key(&key) {
            return Ok(());
        }

        let record = Record::tombstone(key);
        self.writer.append(&record)?;
        self.key_dir.remove(&record.key);
        Ok(())
    }

    /// List every live key, in no particular order.
    pub fn list_keys(&self) -> Vec<Key> {
        self.key_dir.keys()
    }

    /// Returns the number of live keys.
    pub fn len(&self) -> usize {
        self.key_dir.len()
    }

    /// Returns true if the cask holds no live keys.
    pub fn is_empty(&self) -> bool {
        self.key_dir.is_empty()
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Flush the active log file to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.writer.sync()
    }
}
