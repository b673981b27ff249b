//! Snapshot file format layer.
//!
//! This module bridges raw file I/O and the high-level
//! [`SnapshotReader`](crate::dict::reader::SnapshotReader) /
//! [`SnapshotWriter`](crate::dict::writer::SnapshotWriter).
//!
//! # Module Organization
//!
//! - [`header`]: Fixed-size header carrying counts and the compression type
//! - [`index`]: Block index describing where each block lives
//! - [`content`]: Encoding and decoding of individual blocks
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse() / header::write()
//! ├─────────────────┤
//! │  Block Index    │ ← index::parse() / index::write()
//! ├─────────────────┤
//! │  Entry Blocks   │ ← content::decode_block() / content::encode_block()
//! │  (compressed,   │
//! │   checksummed)  │
//! └─────────────────┘
//! ```

pub mod content;
pub mod header;
pub mod index;
