//! # Block Index
//!
//! The index follows the header and holds one 24-byte record per block:
//!
//! ```text
//! [8 bytes] Entries in block      (big-endian u64)
//! [8 bytes] Stored block size     (big-endian u64, includes the 8-byte block header)
//! [8 bytes] Decompressed size     (big-endian u64)
//! ```
//!
//! followed by an Adler32 of all index bytes (little-endian u32). File offsets
//! and first-entry positions are not stored; they are accumulated while parsing.

use std::io::{Read, Write};

use adler2::adler32_slice;
use byteorder::{BigEndian, LittleEndian, ReadBytesExt, WriteBytesExt};
use log::trace;

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{BlockMeta, SnapshotHeader, BLOCK_HEADER_LEN, INDEX_RECORD_LEN};

/// Parses the block index.
///
/// `data_offset` is the absolute file position where the first block begins,
/// i.e. just past the index checksum.
pub fn parse<R: Read>(file: &mut R, header: &SnapshotHeader, data_offset: u64) -> Result<Vec<BlockMeta>> {
    let index_len = usize::try_from(header.num_blocks)
        .ok()
        .and_then(|n| n.checked_mul(INDEX_RECORD_LEN))
        .ok_or_else(|| DictError::InvalidFormat(format!("Implausible block count: {}", header.num_blocks)))?;

    let mut index_bytes = vec![0u8; index_len];
    file.read_exact(&mut index_bytes)?;

    let checksum_expected = file.read_u32::<LittleEndian>()?;
    let checksum_actual = adler32_slice(&index_bytes);
    if checksum_actual != checksum_expected {
        return Err(DictError::ChecksumMismatch {
            context: "block index",
            expected: checksum_expected,
            actual: checksum_actual,
        });
    }

    let mut blocks = Vec::with_capacity(header.num_blocks as usize);
    let mut reader = index_bytes.as_slice();
    let mut file_offset = data_offset;
    let mut first_entry = 0u64;

    while !reader.is_empty() {
        let num_entries = reader.read_u64::<BigEndian>()?;
        let compressed_size = reader.read_u64::<BigEndian>()?;
        let decompressed_size = reader.read_u64::<BigEndian>()?;

        if compressed_size < BLOCK_HEADER_LEN {
            return Err(DictError::InvalidFormat(format!(
                "Block {} is {} bytes, shorter than its header",
                blocks.len(),
                compressed_size
            )));
        }

        trace!(
            "Block {}: entries={}, stored={} bytes, decompressed={} bytes, offset={}",
            blocks.len(),
            num_entries,
            compressed_size,
            decompressed_size,
            file_offset
        );

        blocks.push(BlockMeta {
            num_entries,
            compressed_size,
            decompressed_size,
            file_offset,
            first_entry,
        });
        file_offset = file_offset
            .checked_add(compressed_size)
            .ok_or_else(|| DictError::InvalidFormat(format!("Block {} extends past the addressable range", blocks.len())))?;
        first_entry = first_entry
            .checked_add(num_entries)
            .ok_or_else(|| DictError::InvalidFormat("Entry count overflows".to_string()))?;
    }

    if first_entry != header.num_entries {
        return Err(DictError::CountMismatch {
            item_type: "entries in block index",
            expected: header.num_entries,
            found: first_entry,
        });
    }

    Ok(blocks)
}

/// Writes the block index followed by its checksum.
pub fn write<W: Write>(out: &mut W, blocks: &[BlockMeta]) -> Result<()> {
    let mut index_bytes = Vec::with_capacity(blocks.len() * INDEX_RECORD_LEN);
    for block in blocks {
        index_bytes.write_u64::<BigEndian>(block.num_entries)?;
        index_bytes.write_u64::<BigEndian>(block.compressed_size)?;
        index_bytes.write_u64::<BigEndian>(block.decompressed_size)?;
    }
    out.write_all(&index_bytes)?;
    out.write_u32::<LittleEndian>(adler32_slice(&index_bytes))?;
    Ok(())
}

/// Size in bytes of an index holding `num_blocks` records, checksum included.
pub fn encoded_len(num_blocks: u64) -> u64 {
    num_blocks.saturating_mul(INDEX_RECORD_LEN as u64).saturating_add(4)
}
