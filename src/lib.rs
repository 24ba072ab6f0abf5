//! caskdb - Bitcask-Style Key-Value Storage Engine
//!
//! An embedded, log-structured key-value store in the Bitcask design:
//! values are appended to immutable on-disk log files, and an in-memory
//! index (the KeyDir) maps each key to the location of its most recent
//! value.
//!
//! ## Features
//! - **Append-only logs**: every write is a durable, flushed append
//! - **KeyDir index**: O(1) in-memory lookups, one disk seek per read
//! - **Crash recovery**: the KeyDir is rebuilt by replaying the logs on open
//! - **Tombstones**: deletes are logged and survive restarts
//!
//! ## Example
//! ```no_run
//! use caskdb::{config::Config, engine::Cask};
//!
//! let config = Config::new("./data");
//! let mut cask = Cask::open(config).unwrap();
//!
//! cask.put(b"key".to_vec(), b"value".to_vec()).unwrap();
//! assert_eq!(cask.get(b"key").unwrap(), b"value".to_vec());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod types;
