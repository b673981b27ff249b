//! Snapshot header parsing and writing.
//!
//! # Header Structure
//! ```text
//! [4 bytes] Magic b"LXDB"
//! [2 bytes] Format version (big-endian u16)
//! [8 bytes] Number of entries (big-endian u64)
//! [8 bytes] Number of blocks (big-endian u64)
//! [4 bytes] Compression type (big-endian u32)
//! [4 bytes] Adler32 of the preceding 26 bytes (little-endian u32)
//! ```

use std::io::{Read, Write};

use adler2::adler32_slice;
use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt, WriteBytesExt};
use log::{debug, trace};

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::{CompressionType, SnapshotHeader, FORMAT_VERSION, HEADER_LEN, MAGIC};

/// Returns true if `bytes` starts with the snapshot magic.
pub fn has_magic(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && bytes[..MAGIC.len()] == MAGIC
}

/// Parses the header from the beginning of a snapshot.
pub fn parse<R: Read>(file: &mut R) -> Result<SnapshotHeader> {
    let mut header_bytes = [0u8; HEADER_LEN];
    file.read_exact(&mut header_bytes)?;

    if !has_magic(&header_bytes) {
        return Err(DictError::InvalidFormat(format!(
            "Bad magic {:02x?}, not a dictionary snapshot",
            &header_bytes[..MAGIC.len()]
        )));
    }

    let checksum_expected = file.read_u32::<LittleEndian>()?;
    let checksum_actual = adler32_slice(&header_bytes);
    trace!("Header checksum: expected={:#010x}, actual={:#010x}", checksum_expected, checksum_actual);
    if checksum_actual != checksum_expected {
        return Err(DictError::ChecksumMismatch {
            context: "header",
            expected: checksum_expected,
            actual: checksum_actual,
        });
    }

    let version = BigEndian::read_u16(&header_bytes[4..6]);
    if version != FORMAT_VERSION {
        return Err(DictError::UnsupportedVersion(version));
    }

    let header = SnapshotHeader {
        version,
        num_entries: BigEndian::read_u64(&header_bytes[6..14]),
        num_blocks: BigEndian::read_u64(&header_bytes[14..22]),
        compression: CompressionType::try_from(BigEndian::read_u32(&header_bytes[22..26]))?,
    };
    debug!(
        "Snapshot header: version={}, entries={}, blocks={}, compression={}",
        header.version, header.num_entries, header.num_blocks, header.compression
    );
    Ok(header)
}

/// Writes the header followed by its checksum.
pub fn write<W: Write>(out: &mut W, header: &SnapshotHeader) -> Result<()> {
    let mut header_bytes = Vec::with_capacity(HEADER_LEN);
    header_bytes.extend_from_slice(&MAGIC);
    header_bytes.write_u16::<BigEndian>(header.version)?;
    header_bytes.write_u64::<BigEndian>(header.num_entries)?;
    header_bytes.write_u64::<BigEndian>(header.num_blocks)?;
    header_bytes.write_u32::<BigEndian>(header.compression.tag())?;

    out.write_all(&header_bytes)?;
    out.write_u32::<LittleEndian>(adler32_slice(&header_bytes))?;
    Ok(())
}
