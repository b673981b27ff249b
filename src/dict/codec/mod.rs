//! Codec layer for block payloads.
//!
//! # Submodules
//!
//! - [`compression`][]: Compression and decompression (none, Zlib/deflate)

pub mod compression;
