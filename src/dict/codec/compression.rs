//! Compression algorithms for snapshot blocks.
//!
//! Snapshots support two block encodings:
//! - None (type 0): Payload stored as-is
//! - Zlib (type 2): Standard deflate compression
//!
//! Type 1 is reserved for LZO and is rejected when reading.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::trace;

use crate::dict::types::error::{DictError, Result};
use crate::dict::types::models::CompressionType;

/// Compresses a block payload with the given algorithm.
pub fn compress_payload(payload: &[u8], compression_type: CompressionType, level: u32) -> Result<Vec<u8>> {
    match compression_type {
        CompressionType::None => Ok(payload.to_vec()),
        CompressionType::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(payload.len() / 2), Compression::new(level.min(9)));
            encoder.write_all(payload)?;
            let compressed = encoder.finish()?;
            trace!("Compressed with Zlib: {} bytes -> {} bytes", payload.len(), compressed.len());
            Ok(compressed)
        }
    }
}

/// Decompresses a block payload.
///
/// # Validation
/// Verifies that the decompressed size exactly matches `expected_size`.
///
/// # Errors
/// Returns an error if decompression fails or size validation fails.
pub fn decompress_payload(
    payload: &[u8],
    compression_type: CompressionType,
    expected_size: u64,
) -> Result<Vec<u8>> {
    let decompressed = match compression_type {
        CompressionType::None => {
            trace!("No compression, copying {} bytes", payload.len());
            payload.to_vec()
        }
        CompressionType::Zlib => {
            trace!(
                "Decompressing with Zlib: {} bytes -> {} bytes (expected)",
                payload.len(),
                expected_size
            );
            let mut output = Vec::with_capacity(expected_size.min(1 << 26) as usize);
            // One byte of slack so an oversized stream shows up as a size mismatch.
            let mut decoder = ZlibDecoder::new(payload).take(expected_size.saturating_add(1));
            decoder.read_to_end(&mut output).map_err(|e| {
                DictError::DecompressionError(format!("Zlib decompression failed: {}", e))
            })?;
            output
        }
    };

    if decompressed.len() as u64 != expected_size {
        return Err(DictError::SizeMismatch {
            context: format!("{} decompressed block", compression_type),
            expected: expected_size,
            found: decompressed.len() as u64,
        });
    }

    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zlib_payload_survives_compression() {
        let payload = b"aardvark aardvark aardvark aardvark".repeat(20);
        let packed = compress_payload(&payload, CompressionType::Zlib, 6).unwrap();
        assert!(packed.len() < payload.len());
        let unpacked = decompress_payload(&packed, CompressionType::Zlib, payload.len() as u64).unwrap();
        assert_eq!(unpacked, payload);
    }

    #[test]
    fn wrong_expected_size_is_rejected() {
        let packed = compress_payload(b"hello", CompressionType::Zlib, 6).unwrap();
        let err = decompress_payload(&packed, CompressionType::Zlib, 3).unwrap_err();
        assert!(matches!(err, DictError::SizeMismatch { expected: 3, found: 4, .. }));
    }

    #[test]
    fn garbage_zlib_stream_fails() {
        let err = decompress_payload(&[0xde, 0xad, 0xbe, 0xef], CompressionType::Zlib, 10).unwrap_err();
        assert!(matches!(err, DictError::DecompressionError(_)));
    }
}
