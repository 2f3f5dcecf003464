//! Structured binary I/O with a running CRC-32.
//!
//! Integers are little-endian, counts and lengths are LEB128 varints and
//! strings are a varint byte length followed by UTF-8. Every byte written or
//! read through these types is folded into a CRC-32 so a trailing checksum
//! can be appended on write and verified on read.

use std::io::{Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use crc32fast::Hasher;

use crate::error::{BayesFilterError, Result};
use crate::util::varint::{encode_u64, read_u64};

/// A structured writer for binary data.
pub struct StructWriter<W: Write> {
    writer: W,
    hasher: Hasher,
    position: u64,
}

impl<W: Write> StructWriter<W> {
    /// Create a new structured writer.
    pub fn new(writer: W) -> Self {
        StructWriter {
            writer,
            hasher: Hasher::new(),
            position: 0,
        }
    }

    /// Write a u32 value (little-endian).
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.update_checksum(&value.to_le_bytes());
        Ok(())
    }

    /// Write a u64 value (little-endian).
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.writer.write_u64::<LittleEndian>(value)?;
        self.update_checksum(&value.to_le_bytes());
        Ok(())
    }

    /// Write a variable-length integer.
    pub fn write_varint(&mut self, value: u64) -> Result<()> {
        let encoded = encode_u64(value);
        self.write_raw(&encoded)
    }

    /// Write a string with length prefix.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.write_varint(bytes.len() as u64)?;
        self.write_raw(bytes)
    }

    /// Write raw bytes without length prefix.
    pub fn write_raw(&mut self, value: &[u8]) -> Result<()> {
        self.writer.write_all(value)?;
        self.update_checksum(value);
        Ok(())
    }

    /// Number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// CRC-32 of everything written so far.
    pub fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Return the underlying writer without appending a checksum.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Append the checksum, flush and hand back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        let checksum = self.checksum();
        self.writer.write_u32::<LittleEndian>(checksum)?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn update_checksum(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.position += data.len() as u64;
    }
}

/// A structured reader for binary data.
pub struct StructReader<R: Read> {
    reader: R,
    hasher: Hasher,
    position: u64,
    size: u64,
}

impl<R: Read> StructReader<R> {
    /// Create a new structured reader over `size` bytes of input.
    pub fn new(reader: R, size: u64) -> Self {
        StructReader {
            reader,
            hasher: Hasher::new(),
            position: 0,
            size,
        }
    }

    /// Read a u32 value (little-endian).
    pub fn read_u32(&mut self) -> Result<u32> {
        let value = self.reader.read_u32::<LittleEndian>()?;
        self.update_checksum(&value.to_le_bytes());
        Ok(value)
    }

    /// Read a u64 value (little-endian).
    pub fn read_u64(&mut self) -> Result<u64> {
        let value = self.reader.read_u64::<LittleEndian>()?;
        self.update_checksum(&value.to_le_bytes());
        Ok(value)
    }

    /// Read a variable-length integer.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, bytes) = read_u64(&mut self.reader)?;
        self.update_checksum(&bytes);
        Ok(value)
    }

    /// Read a string with length prefix.
    pub fn read_string(&mut self) -> Result<String> {
        let length = self.read_varint()?;
        let bytes = self.read_raw(length)?;

        String::from_utf8(bytes)
            .map_err(|e| BayesFilterError::storage(format!("Invalid UTF-8: {e}")))
    }

    /// Read an exact number of raw bytes.
    ///
    /// Lengths beyond the remaining input are rejected before allocating.
    pub fn read_raw(&mut self, length: u64) -> Result<Vec<u8>> {
        if length > self.remaining() {
            return Err(BayesFilterError::storage(format!(
                "Length {length} exceeds the {} remaining bytes",
                self.remaining()
            )));
        }

        let mut bytes = vec![0u8; length as usize];
        self.reader.read_exact(&mut bytes)?;
        self.update_checksum(&bytes);
        Ok(bytes)
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total input size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Bytes left between the current position and the end of input.
    pub fn remaining(&self) -> u64 {
        self.size.saturating_sub(self.position)
    }

    /// CRC-32 of everything read so far.
    pub fn checksum(&self) -> u32 {
        self.hasher.clone().finalize()
    }

    /// Read the trailing checksum and compare it with the running one.
    pub fn verify_checksum(&mut self) -> Result<bool> {
        let expected = self.checksum();
        let stored = self.reader.read_u32::<LittleEndian>()?;
        self.position += 4;
        Ok(stored == expected)
    }

    fn update_checksum(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.position += data.len() as u64;
    }
}
