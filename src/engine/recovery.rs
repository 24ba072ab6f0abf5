//! caskdb - Recovery Scanner
//! Rebuilds the KeyDir by replaying every log file in the data directory
//! at store-open time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::engine::codec;
use crate::engine::keydir::KeyDir;
use crate::engine::log::LOG_EXTENSION;
use crate::error::Result;

/// Scan `data_dir` and rebuild the KeyDir from its log files.
///
/// Files without the cask extension and subdirectories are ignored. The
/// order files are visited in does not matter for correctness: every
/// record carries its own timestamp, and [`KeyDir::replay`] resolves
/// conflicts last-write-wins.
pub fn rebuild_keydir(data_dir: &Path) -> Result<KeyDir> {
    let mut key_dir = KeyDir::new();

    for entry in std::fs::read_dir(data_dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(LOG_EXTENSION) {
            continue;
        }
        replay_file(&mut key_dir, &path)?;
    }

    Ok(key_dir)
}

/// Replay a single log file into the KeyDir, oldest record first.
fn replay_file(key_dir: &mut KeyDir, path: &Path) -> Result<()> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut record_start = 0u64;
    let mut records = 0usize;

    while let Some(record) = codec::read_record(&mut reader)? {
        key_dir.replay(path, &record, record_start);
        record_start += record.encoded_len();
        records += 1;
    }

    log::debug!("Replayed {} records from {:?}", records, path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use crate::types::Record;

    fn write_log(dir: &Path, name: &str, records: &[Record]) {
        let mut file = File::create(dir.join(name)).unwrap();
        for record in records {
            file.write_all(&codec::encode(record)).unwrap();
        }
    }

    #[test]
    fn test_empty_directory_yields_empty_keydir() {
        let dir = tempfile::tempdir().unwrap();
        let key_dir = rebuild_keydir(dir.path()).unwrap();
        assert!(key_dir.is_empty());
    }

    #[test]
    fn test_foreign_files_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not a log").unwrap();
        std::fs::create_dir(dir.path().join("subdir.cask")).unwrap();

        let key_dir = rebuild_keydir(dir.path()).unwrap();
        assert!(key_dir.is_empty());
    }

    #[test]
    fn test_replays_records_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        write_log(
            dir.path(),
            "1.cask",
            &[
                Record {
                    timestamp: 10,
                    key: b"k".to_vec(),
                    value: b"old".to_vec(),
                },
                Record {
                    timestamp: 20,
                    key: b"k".to_vec(),
                    value: b"new".to_vec(),
                },
            ],
        );

        let key_dir = rebuild_keydir(dir.path()).unwrap();
        let entry = key_dir.get(b"k").unwrap();
        assert_eq!(entry.timestamp, 20);
        assert_eq!(entry.value_size, 3);
    }

    #[test]
    fn test_merges_multiple_files_by_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        write_log(
            dir.path(),
            "2.cask",
            &[Record {
                timestamp: 30,
                key: b"k".to_vec(),
                value: b"newest".to_vec(),
            }],
        );
        write_log(
            dir.path(),
            "1.cask",
            &[Record {
                timestamp: 10,
                key: b"k".to_vec(),
                value: b"oldest".to_vec(),
            }],
        );

        let key_dir = rebuild_keydir(dir.path()).unwrap();
        let entry = key_dir.get(b"k").unwrap();
        assert_eq!(entry.timestamp, 30);
        assert_eq!(entry.file_id, dir.path().join("2.cask"));
    }

    #[test]
    fn test_tombstone_prunes_key_on_load() {
        let dir = tempfile::tempdir().unwrap();
        write_log(
            dir.path(),
            "1.cask",
            &[
                Record {
                    timestamp: 10,
                    key: b"keep".to_vec(),
                    value: b"v".to_vec(),
                },
                Record {
                    timestamp: 20,
                    key: b"gone".to_vec(),
                    value: b"v".to_vec(),
                },
                Record {
                    timestamp: 30,
                    key: b"gone".to_vec(),
                    value: crate::types::TOMBSTONE.to_vec(),
                },
            ],
        );

        let key_dir = rebuild_keydir(dir.path()).unwrap();
        assert!(key_dir.contains_key(b"keep"));
        assert!(!key_dir.contains_key(b"gone"));
        assert_eq!(key_dir.len(), 1);
    }

    #[test]
    fn test_truncated_tail_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let whole = Record {
            timestamp: 10,
            key: b"k".to_vec(),
            value: b"v".to_vec(),
        };
        let partial = Record {
            timestamp: 20,
            key: b"k".to_vec(),
            value: b"never finished".to_vec(),
        };

        let mut bytes = codec::encode(&whole);
        let tail = codec::encode(&partial);
        bytes.extend_from_slice(&tail[..tail.len() - 5]);
        std::fs::write(dir.path().join("1.cask"), &bytes).unwrap();

        let key_dir = rebuild_keydir(dir.path()).unwrap();
        assert_eq!(key_dir.get(b"k").unwrap().timestamp, 10);
    }
}
