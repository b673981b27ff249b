//! Core data structures for the dictionary store.
//!
//! This module defines the fundamental types used throughout the library:
//! - Dictionary entries and the in-memory word map
//! - Snapshot header and block index metadata
//! - Compression enumeration and writer options

use std::collections::HashMap;

use super::error::{DictError, Result};

/// Magic bytes opening every snapshot file.
pub const MAGIC: [u8; 4] = *b"LXDB";

/// The only snapshot format version this build reads and writes.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the fixed header, excluding its trailing checksum.
pub const HEADER_LEN: usize = 26;

/// Size of a single block index record.
pub const INDEX_RECORD_LEN: usize = 24;

/// Size of the header prepended to every stored block.
pub const BLOCK_HEADER_LEN: u64 = 8;

/// Default number of entries packed into one block.
pub const DEFAULT_ENTRIES_PER_BLOCK: usize = 4096;

/// In-memory word map: exact word to its ordered meanings.
pub type Dictionary = HashMap<String, Vec<String>>;

/// A single dictionary record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub word: String,
    pub meanings: Vec<String>,
}

impl Entry {
    pub fn new(word: impl Into<String>, meanings: Vec<String>) -> Self {
        Self {
            word: word.into(),
            meanings,
        }
    }
}

/// Parsed snapshot header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub version: u16,
    pub num_entries: u64,
    pub num_blocks: u64,
    pub compression: CompressionType,
}

/// Metadata describing a single stored block.
///
/// Snapshots are divided into blocks so that a reader can decode one block
/// at a time instead of inflating the whole corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockMeta {
    /// Number of entries encoded in this block.
    pub num_entries: u64,
    /// Size of the block as stored in the file, including its 8-byte header.
    pub compressed_size: u64,
    /// Size of the payload after decompression.
    pub decompressed_size: u64,
    /// Absolute byte offset of the block in the file.
    pub file_offset: u64,
    /// Index of the first entry of this block across the whole snapshot.
    pub first_entry: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    None,
    Zlib,
}

impl CompressionType {
    /// The numeric tag stored in the header and in every block header.
    pub fn tag(&self) -> u32 {
        match self {
            CompressionType::None => 0,
            CompressionType::Zlib => 2,
        }
    }
}

impl TryFrom<u32> for CompressionType {
    type Error = DictError;
    fn try_from(value: u32) -> Result<Self> {
        match value {
            0 => Ok(Self::None),
            2 => Ok(Self::Zlib),
            _ => Err(DictError::UnsupportedCompression(value)),
        }
    }
}

impl std::fmt::Display for CompressionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CompressionType::None => write!(f, "none"),
            CompressionType::Zlib => write!(f, "zlib"),
        }
    }
}

/// Options controlling how a snapshot is written.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    pub compression: CompressionType,
    /// Zlib level, 0-9. Ignored when compression is `None`.
    pub level: u32,
    pub entries_per_block: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compression: CompressionType::Zlib,
            level: 6,
            entries_per_block: DEFAULT_ENTRIES_PER_BLOCK,
        }
    }
}
