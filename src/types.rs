//! caskdb - Core Type Definitions
//! Defines fundamental types used across the storage engine.

/// Key type for the storage engine.
/// Using Vec<u8> allows arbitrary binary keys (including empty).
pub type Key = Vec<u8>;

/// Value type for the storage engine.
/// Using Vec<u8> allows arbitrary binary values.
pub type Value = Vec<u8>;

/// Reserved value written when a key is deleted. Records carrying this
/// value are treated as tombstones the next time the cask is loaded.
///
/// An application value equal to this sequence will be misinterpreted as
/// a deletion; callers must not store it.
pub const TOMBSTONE: &[u8] = b"caskdb_tombstone";

/// Size in bytes of a record's fixed header on disk:
/// timestamp (8) + key_size (8) + value_size (8).
pub const RECORD_HEADER_SIZE: u64 = 24;

/// A single record within a cask log file.
/// Tombstones are ordinary records whose value equals [`TOMBSTONE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub timestamp: i64,
    pub key: Key,
    pub value: Value,
}

impl Record {
    /// Create a new record with a value (PUT operation).
    pub fn put(key: Key, value: Value) -> Self {
        Self {
            timestamp: now_micros(),
            key,
            value,
        }
    }

    /// Create a tombstone record (DELETE operation).
    pub fn tombstone(key: Key) -> Self {
        Self {
            timestamp: now_micros(),
            key,
            value: TOMBSTONE.to_vec(),
        }
    }

    /// Returns true if this record is a tombstone.
    pub fn is_tombstone(&self) -> bool {
        self.value == TOMBSTONE
    }

    /// Byte offset of the value payload relative to the record's start:
    /// the fixed header plus the key bytes.
    pub fn value_offset(&self) -> u64 {
        RECORD_HEADER_SIZE + self.key.len() as u64
    }

    /// Total encoded size of this record in bytes.
    pub fn encoded_len(&self) -> u64 {
        self.value_offset() + self.value.len() as u64
    }
}

/// Current wall-clock time in microseconds since the Unix epoch.
/// Used for last-write-wins ordering across records of the same key.
pub fn now_micros() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tombstone_detection() {
        let rec = Record::tombstone(b"key".to_vec());
        assert!(rec.is_tombstone());

        let rec = Record::put(b"key".to_vec(), b"value".to_vec());
        assert!(!rec.is_tombstone());
    }

    #[test]
    fn test_value_offset() {
        let rec = Record::put(b"abcde".to_vec(), b"v".to_vec());
        assert_eq!(rec.value_offset(), RECORD_HEADER_SIZE + 5);
        assert_eq!(rec.encoded_len(), RECORD_HEADER_SIZE + 5 + 1);
    }

    #[test]
    fn test_empty_key_and_value() {
        let rec = Record::put(Vec::new(), Vec::new());
        assert_eq!(rec.value_offset(), RECORD_HEADER_SIZE);
        assert_eq!(rec.encoded_len(), RECORD_HEADER_SIZE);
        assert!(!rec.is_tombstone());
    }
}
