//! caskdb - Append-Only Log Writer
//! Owns the active log file for one store session. Every mutation is
//! appended here before the KeyDir is updated in memory.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::engine::codec;
use crate::error::Result;
use crate::types::{now_micros, Record};

/// File extension given to cask log files.
pub const LOG_EXTENSION: &str = "cask";

/// Append-only writer for the active log file.
///
/// Each store-open session gets its own fresh file, named by the open
/// timestamp in microseconds. Files from earlier sessions are never
/// appended to.
pub struct LogWriter {
    /// Path to the active log file.
    path: PathBuf,
    /// File handle opened for this session.
    file: File,
    /// Current end-of-file position in bytes.
    position: u64,
    /// Whether each append is fsynced before returning.
    sync_writes: bool,
}

impl LogWriter {
    /// Create a fresh log file in `data_dir` for this session.
    ///
    /// The file name is the current timestamp in microseconds; if two
    /// sessions open within the same microsecond, the timestamp is bumped
    /// until an unused name is found rather than clobbering a live file.
    pub fn create(data_dir: &Path, sync_writes: bool) -> Result<Self> {
        let mut ts = now_micros();
        loop {
            let path = data_dir.join(format!("{}.{}", ts, LOG_EXTENSION));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => {
                    return Ok(Self {
                        path,
                        file,
                        position: 0,
                        sync_writes,
                    })
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => ts += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Returns the path to the active log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record to the active log file and flush it to disk.
    ///
    /// Returns the absolute byte offset of the value payload within the
    /// file, for insertion into the KeyDir.
    pub fn append(&mut self, record: &Record) -> Result<u64> {
        let encoded = codec::encode(record);
        let value_pos = self.position + record.value_offset();

        self.file.write_all(&encoded)?;
        if self.sync_writes {
            self.file.sync_all()?;
        }
        self.position += encoded.len() as u64;

        Ok(value_pos)
    }

    /// Force outstanding writes to disk.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        let _ = self.file.sync_all();
    }
}
