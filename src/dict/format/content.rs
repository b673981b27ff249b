//! # Block Content Encoding & Decoding
//!
//! Turns a stored block into dictionary entries and back. Sits between the
//! reader/writer (which handle file I/O) and the `codec` (pure data
//! transformation).
//!
//! ## Block layout
//! ```text
//! [4 bytes] Info (little-endian u32, low 4 bits = compression type)
//! [4 bytes] Adler32 of the decompressed payload (big-endian u32)
//! [N bytes] Payload
//! ```
//!
//! ## Payload layout (one record per entry)
//! ```text
//! [2 bytes] Word length (big-endian u16) + UTF-8 bytes
//! [2 bytes] Meaning count (big-endian u16)
//! per meaning: [4 bytes] length (big-endian u32) + UTF-8 bytes
//! ```

use adler2::adler32_slice;
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use log::trace;

use crate::dict::codec::compression;
use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{CompressionType, Entry, BLOCK_HEADER_LEN};
use crate::dict::utils;

/// Decodes a stored block into its decompressed payload, verifying the checksum.
pub fn decode_block(raw_block: &[u8], expected_decompressed_size: u64) -> Result<Vec<u8>> {
    if (raw_block.len() as u64) < BLOCK_HEADER_LEN {
        return Err(DictError::InvalidFormat("Block too short (minimum 8 bytes required)".to_string()));
    }

    let info = LittleEndian::read_u32(&raw_block[0..4]);
    let compression_type = CompressionType::try_from(info & 0xF)?;
    let checksum_expected = BigEndian::read_u32(&raw_block[4..8]);
    let payload = &raw_block[8..];

    trace!(
        "Decoding block: compression={}, stored={} bytes, expected_size={} bytes",
        compression_type,
        payload.len(),
        expected_decompressed_size
    );

    let decompressed = compression::decompress_payload(payload, compression_type, expected_decompressed_size)?;

    let checksum_actual = adler32_slice(&decompressed);
    if checksum_actual != checksum_expected {
        return Err(DictError::ChecksumMismatch {
            context: "block payload",
            expected: checksum_expected,
            actual: checksum_actual,
        });
    }

    Ok(decompressed)
}

/// Encodes entries into a stored block.
///
/// Returns the block bytes (header included) and the decompressed payload size.
pub fn encode_block(entries: &[Entry], compression_type: CompressionType, level: u32) -> Result<(Vec<u8>, u64)> {
    let payload = encode_entries(entries)?;
    let compressed = compression::compress_payload(&payload, compression_type, level)?;

    let mut block = Vec::with_capacity(compressed.len() + BLOCK_HEADER_LEN as usize);
    block.write_u32::<LittleEndian>(compression_type.tag())?;
    block.write_u32::<BigEndian>(adler32_slice(&payload))?;
    block.extend_from_slice(&compressed);

    Ok((block, payload.len() as u64))
}

/// Parses entries from a decompressed payload.
pub fn parse_entries(data: &[u8], expected_count: u64) -> Result<Vec<Entry>> {
    let mut entries = Vec::with_capacity(expected_count.min(1 << 16) as usize);
    let mut reader = data;

    while !reader.is_empty() {
        let word = utils::read_prefixed_str(&mut reader, 2, "word")?;
        let num_meanings = reader.read_u16::<BigEndian>()?;
        let mut meanings = Vec::with_capacity(num_meanings as usize);
        for _ in 0..num_meanings {
            meanings.push(utils::read_prefixed_str(&mut reader, 4, "meaning")?);
        }
        entries.push(Entry { word, meanings });
    }

    if entries.len() as u64 != expected_count {
        return Err(DictError::CountMismatch {
            item_type: "entries in block",
            expected: expected_count,
            found: entries.len() as u64,
        });
    }

    Ok(entries)
}

/// Serialises entries into an uncompressed payload.
pub fn encode_entries(entries: &[Entry]) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for entry in entries {
        utils::write_prefixed_str(&mut out, &entry.word, 2, "word")?;
        let num_meanings = u16::try_from(entry.meanings.len()).map_err(|_| DictError::TooLong {
            context: "meaning list",
            len: entry.meanings.len(),
            max: u16::MAX as usize,
        })?;
        out.write_u16::<BigEndian>(num_meanings)?;
        for meaning in &entry.meanings {
            utils::write_prefixed_str(&mut out, meaning, 4, "meaning")?;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("apple", vec!["a fruit".into(), "a tech company".into()]),
            Entry::new("zero", vec![]),
        ]
    }

    #[test]
    fn stored_block_decodes_to_same_entries() {
        let (block, size) = encode_block(&sample(), CompressionType::Zlib, 6).unwrap();
        let payload = decode_block(&block, size).unwrap();
        assert_eq!(parse_entries(&payload, 2).unwrap(), sample());
    }

    #[test]
    fn flipped_payload_byte_fails_checksum() {
        let (mut block, size) = encode_block(&sample(), CompressionType::None, 0).unwrap();
        let last = block.len() - 1;
        block[last] ^= 0x01;
        let err = decode_block(&block, size).unwrap_err();
        assert!(matches!(err, DictError::ChecksumMismatch { context: "block payload", .. }));
    }

    #[test]
    fn reserved_lzo_tag_is_unsupported() {
        let (mut block, size) = encode_block(&sample(), CompressionType::None, 0).unwrap();
        block[0] = 1;
        assert!(matches!(decode_block(&block, size), Err(DictError::UnsupportedCompression(1))));
    }

    #[test]
    fn entry_count_is_checked() {
        let payload = encode_entries(&sample()).unwrap();
        let err = parse_entries(&payload, 3).unwrap_err();
        assert!(matches!(err, DictError::CountMismatch { expected: 3, found: 2, .. }));
    }
}
