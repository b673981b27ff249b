//! Dictionary storage and lookup.
//!
//! - [`SnapshotReader`] / [`SnapshotWriter`]: block-compressed on-disk snapshots
//! - [`Converter`]: JSON source document to snapshot
//! - [`Loader`] implementations: snapshot, JSON, or auto-detected
//! - [`DictionaryService`]: exact lookups and prefix suggestions

pub mod codec;
pub mod converter;
pub mod format;
pub mod iter;
pub mod loader;
pub mod reader;
pub mod service;
pub mod source;
pub mod types;
pub mod utils;
pub mod writer;

pub use converter::{ConversionReport, Converter};
pub use loader::{AutoLoader, JsonLoader, Loader, SnapshotLoader};
pub use reader::SnapshotReader;
pub use service::{DictionaryService, SuggestLimits};
pub use source::{SourceDocument, SourceWord};
pub use types::error::{DictError, Result};
pub use types::models::{CompressionType, Dictionary, Entry, SnapshotHeader, WriteOptions};
pub use writer::{SnapshotWriter, WriteSummary};
