//! Error types for the dictionary store.

use thiserror::Error;

/// The primary error type for loading, converting and writing dictionaries.
#[derive(Debug, Error)]
pub enum DictError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source document is not valid JSON or does not match the expected shape.
    #[error("Invalid source document: {0}")]
    Json(#[from] serde_json::Error),

    /// The snapshot declares a format version this build cannot read.
    #[error("Unsupported snapshot version: {0}. Only version {supported} is supported.", supported = super::models::FORMAT_VERSION)]
    UnsupportedVersion(u16),

    /// A checksum validation failed, indicating data corruption.
    #[error("Checksum mismatch in {context}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        context: &'static str,
        expected: u32,
        actual: u32,
    },

    /// The block uses a compression algorithm this build does not implement.
    #[error("Unsupported compression type: {0}")]
    UnsupportedCompression(u32),

    /// An error occurred during decompression, often due to corrupted data.
    #[error("Decompression failed: {0}")]
    DecompressionError(String),

    /// A declared count of items does not match the actual number of items found.
    #[error("Count mismatch for {item_type}: expected {expected}, but found {found}")]
    CountMismatch {
        item_type: &'static str,
        expected: u64,
        found: u64,
    },

    /// A buffer or data block has an unexpected size after an operation.
    #[error("Size mismatch for {context}: expected {expected} bytes, but found {found} bytes")]
    SizeMismatch {
        context: String,
        expected: u64,
        found: u64,
    },

    /// A string does not fit in the length prefix the format reserves for it.
    #[error("{context} is too long: {len} bytes (maximum {max})")]
    TooLong {
        context: &'static str,
        len: usize,
        max: usize,
    },

    /// The encoding label given for a source document is not recognised.
    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    /// The file is structurally invalid.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// A mutex lock was poisoned, indicating a panic in another thread holding the lock.
    #[error("A mutex lock was poisoned, indicating a panic in another thread holding the lock.")]
    LockPoisoned,
}

/// A convenience `Result` type alias using the crate's `DictError` type.
pub type Result<T> = std::result::Result<T, DictError>;
