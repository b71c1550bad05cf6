//! PXM container reader
//!
//! The directory is read once; payloads are read on demand so extraction never
//! holds more than one entry in memory.

use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, ReadBytesExt};

use super::{HEADER_SIZE, PXM_SIGNATURE, PxmRecord, RECORD_SIZE};
use crate::error::{Error, Result};

/// PXM container reader
pub struct PxmReader<R: Read + Seek> {
    reader: BufReader<R>,
    stream_len: u64,
    signature: Option<u32>,
    records: Vec<PxmRecord>,
}

impl<R: Read + Seek> PxmReader<R> {
    /// Create a new reader from a Read + Seek source
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            stream_len: 0,
            signature: None,
            records: Vec::new(),
        }
    }

    /// Read the header and directory table
    ///
    /// A wrong magic signature is logged and the entry count is still taken
    /// from its fixed offset.
    ///
    /// # Errors
    /// Returns an error if the header or directory table is truncated.
    pub fn read_directory(&mut self) -> Result<&[PxmRecord]> {
        self.stream_len = self.reader.seek(SeekFrom::End(0))?;
        self.reader.seek(SeekFrom::Start(0))?;

        let signature = self.reader.read_u32::<LittleEndian>()?;
        if signature != PXM_SIGNATURE {
            tracing::warn!("Wrong PXM header: {signature:#010x}");
        }
        self.signature = Some(signature);

        let num_entries = self.reader.read_u32::<LittleEndian>()? as usize;
        let table_room = self.stream_len.saturating_sub(HEADER_SIZE as u64) as usize / RECORD_SIZE;

        self.records.clear();
        self.records.reserve(num_entries.min(table_room));

        for _ in 0..num_entries {
            let offset = self.reader.read_u32::<LittleEndian>()?;
            let size = self.reader.read_u32::<LittleEndian>()?;
            self.records.push(PxmRecord { offset, size });
        }

        tracing::debug!("PXM directory: {num_entries} entries, {} bytes", self.stream_len);
        Ok(&self.records)
    }

    /// Directory records read so far
    pub fn records(&self) -> &[PxmRecord] {
        &self.records
    }

    /// Number of entries in the directory
    pub fn entry_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the header carried the PXM signature, once the directory has been read
    pub fn has_valid_signature(&self) -> Option<bool> {
        self.signature.map(|s| s == PXM_SIGNATURE)
    }

    fn checked_record(&self, index: usize) -> Result<PxmRecord> {
        let record = *self.records.get(index).ok_or(Error::EntryOutOfBounds {
            index,
            offset: 0,
            size: 0,
            len: self.stream_len,
        })?;

        if record.end() > self.stream_len {
            return Err(Error::EntryOutOfBounds {
                index,
                offset: u64::from(record.offset),
                size: u64::from(record.size),
                len: self.stream_len,
            });
        }
        Ok(record)
    }

    /// Read one payload into memory
    ///
    /// # Errors
    /// Returns an error if the record lies outside the stream or reading fails.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let record = self.checked_record(index)?;
        self.reader.seek(SeekFrom::Start(u64::from(record.offset)))?;

        let mut data = vec![0u8; record.size as usize];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }

    /// Stream one payload into `writer`, returning the number of bytes copied
    ///
    /// # Errors
    /// Returns an error if the record lies outside the stream or copying fails.
    pub fn copy_entry<W: Write>(&mut self, index: usize, writer: &mut W) -> Result<u64> {
        let record = self.checked_record(index)?;
        self.reader.seek(SeekFrom::Start(u64::from(record.offset)))?;

        let mut payload = (&mut self.reader).take(u64::from(record.size));
        let copied = io::copy(&mut payload, writer)?;
        if copied != u64::from(record.size) {
            return Err(Error::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
        }
        Ok(copied)
    }

    /// Read every payload in directory order
    ///
    /// # Errors
    /// Returns an error if the directory or any payload cannot be read.
    pub fn read_all(&mut self) -> Result<Vec<Vec<u8>>> {
        if self.signature.is_none() {
            self.read_directory()?;
        }
        (0..self.records.len()).map(|i| self.read_entry(i)).collect()
    }
}

/// Parse every payload of a PXM container held in memory
///
/// # Errors
/// Returns an error if the directory is truncated or a record lies outside `data`.
pub fn parse_pxm_bytes(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    PxmReader::new(Cursor::new(data)).read_all()
}
