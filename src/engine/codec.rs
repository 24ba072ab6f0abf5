//! caskdb - Record Codec
//! Serializes records to and from the on-disk log format.
//!
//! ## Binary Format (per record, little-endian, no separators)
//! ```text
//! [timestamp: 8 bytes][key_size: 8 bytes][value_size: 8 bytes][key: N bytes][value: M bytes]
//! ```

use std::io::{ErrorKind, Read};

use bytes::{Buf, BufMut};

use crate::types::{Record, RECORD_HEADER_SIZE};

/// Encode a record into its on-disk byte representation.
pub fn encode(record: &Record) -> Vec<u8> {
    let mut buf = Vec::with_capacity(record.encoded_len() as usize);
    buf.put_i64_le(record.timestamp);
    buf.put_u64_le(record.key.len() as u64);
    buf.put_u64_le(record.value.len() as u64);
    buf.put_slice(&record.key);
    buf.put_slice(&record.value);
    buf
}

/// Decode the next record from a byte stream.
///
/// Returns `Ok(None)` at end-of-stream. A record truncated at the end of
/// the stream is also reported as end-of-stream, never as an error: there
/// is no checksum, so a short tail is dropped silently on replay.
pub fn read_record<R: Read>(reader: &mut R) -> std::io::Result<Option<Record>> {
    let mut header = [0u8; RECORD_HEADER_SIZE as usize];
    match reader.read_exact(&mut header) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let mut header = &header[..];
    let timestamp = header.get_i64_le();
    let key_size = header.get_u64_le() as usize;
    let value_size = header.get_u64_le() as usize;

    let mut key = vec![0u8; key_size];
    let mut value = vec![0u8; value_size];
    match reader
        .read_exact(&mut key)
        .and_then(|_| reader.read_exact(&mut value))
    {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    Ok(Some(Record {
        timestamp,
        key,
        value,
    }))
}
