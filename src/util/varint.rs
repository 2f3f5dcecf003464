//! Variable-length integer encoding utilities.
//!
//! LEB128-style: 7 bits per byte, high bit set on every byte but the last.
//! Small counts, which dominate word frequency tables, take a single byte.

use std::io::{Read, Write};

use byteorder::ReadBytesExt;

use crate::error::{BayesFilterError, Result};

/// Longest possible encoding of a u64.
pub const MAX_VARINT_LEN_U64: usize = 10;

/// Encode a u64 value using variable-length encoding.
pub fn encode_u64(value: u64) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(MAX_VARINT_LEN_U64);
    let mut val = value;

    loop {
        let mut byte = (val & 0x7F) as u8;
        val >>= 7;

        if val != 0 {
            byte |= 0x80; // Set continuation bit
        }

        bytes.push(byte);

        if val == 0 {
            break;
        }
    }

    bytes
}

/// Decode a u64 value from variable-length encoding.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_u64(bytes: &[u8]) -> Result<(u64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;

    for (i, &byte) in bytes.iter().enumerate() {
        accumulate(&mut result, shift, byte)?;

        if (byte & 0x80) == 0 {
            return Ok((result, i + 1));
        }

        shift += 7;
    }

    Err(BayesFilterError::other("Incomplete VarInt"))
}

/// Write a variable-length encoded u64 to a writer.
pub fn write_u64<W: Write>(writer: &mut W, value: u64) -> Result<usize> {
    let bytes = encode_u64(value);
    writer.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Read a variable-length encoded u64 from a reader.
///
/// Returns the value together with the raw bytes that encoded it.
pub fn read_u64<R: Read>(reader: &mut R) -> Result<(u64, Vec<u8>)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut raw = Vec::with_capacity(2);

    loop {
        let byte = reader.read_u8()?;
        raw.push(byte);
        accumulate(&mut result, shift, byte)?;

        if (byte & 0x80) == 0 {
            return Ok((result, raw));
        }

        shift += 7;
    }
}

fn accumulate(result: &mut u64, shift: u32, byte: u8) -> Result<()> {
    let payload = (byte & 0x7F) as u64;
    // The tenth byte may only carry the single remaining bit.
    if shift >= 64 || (shift == 63 && payload > 1) {
        return Err(BayesFilterError::other("VarInt overflow"));
    }
    *result |= payload << shift;
    Ok(())
}
