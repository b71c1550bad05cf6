//! PXM container writer
//!
//! Payload sizes are resolved before anything is written, so the directory
//! can be emitted ahead of the data in a single forward pass.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, WriteBytesExt};

use super::{HEADER_SIZE, PXM_SIGNATURE, PxmRecord, RECORD_SIZE, compute_layout};
use crate::error::{Error, Result};
use crate::formats::{WORD_SIZE, padding_for};

/// Where a payload comes from
#[derive(Debug, Clone)]
pub enum PayloadSource {
    /// Payload already in memory
    Bytes(Vec<u8>),
    /// Payload read lazily from a file when it is written
    File(PathBuf),
}

impl PayloadSource {
    fn size(&self) -> Result<u32> {
        let size = match self {
            PayloadSource::Bytes(data) => data.len() as u64,
            PayloadSource::File(path) => fs::metadata(path)?.len(),
        };
        u32::try_from(size).map_err(|_| Error::PayloadTooLarge { size })
    }

    fn copy_to<W: Write>(&self, writer: &mut W, size: u32) -> Result<()> {
        match self {
            PayloadSource::Bytes(data) => writer.write_all(data)?,
            PayloadSource::File(path) => {
                let mut file = File::open(path)?.take(u64::from(size));
                let copied = io::copy(&mut file, writer)?;
                // File shrank between sizing and copying
                if copied != u64::from(size) {
                    return Err(Error::Io(io::Error::from(io::ErrorKind::UnexpectedEof)));
                }
            }
        }
        Ok(())
    }
}

/// PXM container writer
#[derive(Debug, Default)]
pub struct PxmWriter {
    sources: Vec<PayloadSource>,
}

impl PxmWriter {
    /// Create an empty writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer that packs the given files in order
    pub fn from_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: paths.into_iter().map(|p| PayloadSource::File(p.into())).collect(),
        }
    }

    /// Append a file payload
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(PayloadSource::File(path.into()));
        self
    }

    /// Append an in-memory payload
    #[must_use]
    pub fn with_bytes(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.sources.push(PayloadSource::Bytes(data.into()));
        self
    }

    /// Number of payloads that will be written
    pub fn entry_count(&self) -> usize {
        self.sources.len()
    }

    /// Compute the directory without writing anything
    ///
    /// # Errors
    /// Returns an error if a file payload cannot be inspected or is too large.
    pub fn layout(&self) -> Result<Vec<PxmRecord>> {
        let sizes = self
            .sources
            .iter()
            .map(PayloadSource::size)
            .collect::<Result<Vec<_>>>()?;
        compute_layout(&sizes)
    }

    /// Write the container to disk, returning its directory
    ///
    /// Sizes are resolved before the output is created, so a missing input
    /// leaves no output behind. Failures while copying payloads may leave a
    /// truncated file.
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or the output cannot be written.
    pub fn write(&self, output_path: impl AsRef<Path>) -> Result<Vec<PxmRecord>> {
        self.write_with_progress(output_path, &|_, _| {})
    }

    /// Write the container to disk with a per-payload progress callback
    ///
    /// The callback receives the 1-based payload number and the total.
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or the output cannot be written.
    pub fn write_with_progress(
        &self,
        output_path: impl AsRef<Path>,
        progress: &dyn Fn(usize, usize),
    ) -> Result<Vec<PxmRecord>> {
        let records = self.layout()?;

        let file = File::create(output_path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_records(&mut writer, &records, progress)?;
        writer.flush()?;

        Ok(records)
    }

    /// Write the container into any writer, returning its directory
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or writing fails.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<Vec<PxmRecord>> {
        let records = self.layout()?;
        self.write_records(writer, &records, &|_, _| {})?;
        Ok(records)
    }

    fn write_records<W: Write>(
        &self,
        writer: &mut W,
        records: &[PxmRecord],
        progress: &dyn Fn(usize, usize),
    ) -> Result<()> {
        write_directory(writer, records)?;

        let total = self.sources.len();
        for (i, (source, record)) in self.sources.iter().zip(records).enumerate() {
            progress(i + 1, total);
            source.copy_to(writer, record.size)?;
            write_padding(writer, padding_for(record.size as usize))?;
        }
        Ok(())
    }
}

/// Serialize in-memory payloads into a PXM container
///
/// # Errors
/// Returns [`Error::PayloadTooLarge`] if the container would exceed 32-bit offsets.
pub fn write_pxm_bytes(payloads: &[&[u8]]) -> Result<Vec<u8>> {
    let writer = payloads
        .iter()
        .fold(PxmWriter::new(), |writer, data| writer.with_bytes(*data));
    let mut buffer = Vec::new();
    writer.write_to(&mut buffer)?;
    Ok(buffer)
}

/// Write the two-entry PXM produced from a three-entry QLP.
///
/// Entry 0 is `second` and `third` concatenated, entry 1 is `first`. On disk the
/// merged region comes first and is always followed by 1 to 4 bytes of padding
/// (a full word when it is already aligned); `first` follows with no trailing
/// padding. For aligned merged sizes this differs from the legacy tool, which
/// wrote no gap there and padded after `first`.
///
/// # Errors
/// Returns an error if a size does not fit the directory or writing fails.
pub fn write_merged_pxm<W: Write>(
    writer: &mut W,
    first: &[u8],
    second: &[u8],
    third: &[u8],
) -> Result<Vec<PxmRecord>> {
    let merged_len = second.len() + third.len();
    let gap = WORD_SIZE - merged_len % WORD_SIZE;

    let merged_offset = HEADER_SIZE + 2 * RECORD_SIZE;
    let first_offset = merged_offset + merged_len + gap;

    let records = vec![
        PxmRecord {
            offset: to_u32(merged_offset)?,
            size: to_u32(merged_len)?,
        },
        PxmRecord {
            offset: to_u32(first_offset)?,
            size: to_u32(first.len())?,
        },
    ];

    write_directory(writer, &records)?;
    writer.write_all(second)?;
    writer.write_all(third)?;
    write_padding(writer, gap)?;
    writer.write_all(first)?;

    Ok(records)
}

fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value).map_err(|_| Error::PayloadTooLarge { size: value as u64 })
}

fn write_directory<W: Write>(writer: &mut W, records: &[PxmRecord]) -> Result<()> {
    writer.write_u32::<LittleEndian>(PXM_SIGNATURE)?;
    writer.write_u32::<LittleEndian>(to_u32(records.len())?)?;
    for record in records {
        writer.write_u32::<LittleEndian>(record.offset)?;
        writer.write_u32::<LittleEndian>(record.size)?;
    }
    Ok(())
}

fn write_padding<W: Write>(writer: &mut W, len: usize) -> Result<()> {
    writer.write_all(&[0u8; WORD_SIZE][..len])?;
    Ok(())
}
