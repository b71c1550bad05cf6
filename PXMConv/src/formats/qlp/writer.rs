//! QLP container writing
//!
//! Payloads are laid out after the directory in entry order, each starting on
//! a word boundary so its offset can be stored in words.

use super::{HEADER_SIZE, NAME_SIZE, QLP_SIGNATURE, QlpArchive, RECORD_SIZE};
use crate::error::{Error, Result};
use crate::formats::{WORD_SIZE, padding_for};
use byteorder::{LittleEndian, WriteBytesExt};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write a QLP container to disk
///
/// # Errors
/// Returns an error if a name does not fit the name field, a payload is too
/// large, or file writing fails.
pub fn write_qlp<P: AsRef<Path>>(path: P, archive: &QlpArchive) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_qlp_to(&mut writer, archive)?;
    writer.flush()?;
    Ok(())
}

/// Serialize a QLP container into a byte vector
///
/// # Errors
/// Returns an error if a name does not fit the name field or a payload is too large.
pub fn write_qlp_bytes(archive: &QlpArchive) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_qlp_to(&mut buffer, archive)?;
    Ok(buffer)
}

fn write_qlp_to<W: Write>(writer: &mut W, archive: &QlpArchive) -> Result<()> {
    let num_entries = archive.len() as u32;

    writer.write_u32::<LittleEndian>(QLP_SIGNATURE)?;
    writer.write_u32::<LittleEndian>(num_entries)?;

    // Directory
    let mut cursor = HEADER_SIZE + RECORD_SIZE * archive.len();
    for (name, data) in archive.iter() {
        let name_bytes = name.as_bytes();
        if name_bytes.len() > NAME_SIZE {
            return Err(Error::NameTooLong {
                name: name.to_string(),
                len: name_bytes.len(),
                max: NAME_SIZE,
            });
        }
        let mut name_buf = [0u8; NAME_SIZE];
        name_buf[..name_bytes.len()].copy_from_slice(name_bytes);
        writer.write_all(&name_buf)?;

        let size = u32::try_from(data.len()).map_err(|_| Error::PayloadTooLarge {
            size: data.len() as u64,
        })?;
        let word_offset = u32::try_from(cursor / WORD_SIZE).map_err(|_| Error::PayloadTooLarge {
            size: cursor as u64,
        })?;
        writer.write_u32::<LittleEndian>(size)?;
        writer.write_u32::<LittleEndian>(word_offset)?;

        cursor += data.len() + padding_for(data.len());
    }

    // Payloads
    for (_, data) in archive.iter() {
        writer.write_all(data)?;
        writer.write_all(&[0u8; WORD_SIZE][..padding_for(data.len())])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::qlp::parse_qlp_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_names_are_nul_padded() {
        let archive: QlpArchive = [("tim", vec![1u8, 2, 3])].into_iter().collect();
        let bytes = write_qlp_bytes(&archive).unwrap();

        assert_eq!(&bytes[8..11], b"tim");
        assert_eq!(&bytes[11..24], &[0u8; 13]);
        // size 3, offset word 8 (byte 32)
        assert_eq!(&bytes[24..28], &3u32.to_le_bytes());
        assert_eq!(&bytes[28..32], &8u32.to_le_bytes());
        assert_eq!(bytes.len(), 36);

        assert_eq!(parse_qlp_bytes(&bytes).unwrap(), archive);
    }

    #[test]
    fn test_name_too_long() {
        let archive: QlpArchive = [("seventeen_bytes__", Vec::new())].into_iter().collect();
        assert!(matches!(
            write_qlp_bytes(&archive),
            Err(Error::NameTooLong { len: 17, max: 16, .. })
        ));
    }
}
