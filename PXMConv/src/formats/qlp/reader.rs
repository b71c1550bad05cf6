//! QLP container reading and parsing

use super::{HEADER_SIZE, NAME_SIZE, QLP_SIGNATURE, QlpArchive, QlpRecord, RECORD_SIZE};
use crate::error::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// Read a QLP container from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read.
/// Returns [`Error::EntryOutOfBounds`] if a record points past the end of the file.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::EntryOutOfBounds`]: crate::Error::EntryOutOfBounds
pub fn read_qlp<P: AsRef<Path>>(path: P) -> Result<QlpArchive> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_qlp_bytes(&buffer)
}

/// Parse a QLP container from bytes
///
/// A wrong magic signature is logged and parsing continues.
///
/// # Errors
///
/// Returns [`Error::Io`] if the header or a directory record is truncated.
/// Returns [`Error::EntryOutOfBounds`] if a payload lies outside `data`.
///
/// [`Error::Io`]: crate::Error::Io
/// [`Error::EntryOutOfBounds`]: crate::Error::EntryOutOfBounds
pub fn parse_qlp_bytes(data: &[u8]) -> Result<QlpArchive> {
    let mut cursor = Cursor::new(data);

    let signature = cursor.read_u32::<LittleEndian>()?;
    if signature != QLP_SIGNATURE {
        tracing::warn!("Wrong QLP header: {signature:#010x}");
    }

    let num_entries = cursor.read_u32::<LittleEndian>()? as usize;
    let mut archive = QlpArchive::new();

    for index in 0..num_entries {
        let record_start = (HEADER_SIZE + index * RECORD_SIZE) as u64;
        cursor.seek(SeekFrom::Start(record_start))?;
        let record = read_record(&mut cursor)?;

        let offset = record.byte_offset();
        let size = u64::from(record.size);
        let len = data.len() as u64;
        if offset + size > len {
            return Err(Error::EntryOutOfBounds { index, offset, size, len });
        }

        let start = offset as usize;
        let payload = data[start..start + record.size as usize].to_vec();

        tracing::debug!("QLP entry {index}: {:?} ({size} bytes at {offset})", record.name);
        if archive.insert(record.name.clone(), payload).is_some() {
            tracing::debug!("QLP entry {:?} repeated, keeping the later payload", record.name);
        }
    }

    Ok(archive)
}

fn read_record<R: Read>(reader: &mut R) -> Result<QlpRecord> {
    let mut name_bytes = [0u8; NAME_SIZE];
    reader.read_exact(&mut name_bytes)?;

    let size = reader.read_u32::<LittleEndian>()?;
    let word_offset = reader.read_u32::<LittleEndian>()?;

    Ok(QlpRecord {
        name: decode_name(&name_bytes),
        size,
        word_offset,
    })
}

/// Decode a fixed-width name field, dropping trailing NUL padding
fn decode_name(bytes: &[u8]) -> String {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
