//! Conversion from JSON source documents to snapshots.

use std::path::Path;

use encoding_rs::Encoding;
use log::info;
use serde::Serialize;

use super::source::SourceDocument;
use super::types::error::Result;
use super::types::models::WriteOptions;
use super::writer::SnapshotWriter;

/// Outcome of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub source_records: usize,
    pub num_entries: u64,
    pub duplicates: usize,
    pub num_blocks: u64,
    pub bytes_written: u64,
}

/// Converts JSON source documents into block-compressed snapshots.
#[derive(Debug, Default)]
pub struct Converter {
    pub encoding: Option<&'static Encoding>,
    pub options: WriteOptions,
}

impl Converter {
    pub fn new(encoding: Option<&'static Encoding>, options: WriteOptions) -> Self {
        Self { encoding, options }
    }

    pub fn convert(&self, json_path: impl AsRef<Path>, snapshot_path: impl AsRef<Path>) -> Result<ConversionReport> {
        let json_path = json_path.as_ref();
        info!("Converting {} to snapshot", json_path.display());

        let document = SourceDocument::read(json_path, self.encoding)?;
        let source_records = document.words.len();
        let built = document.into_dictionary();

        let summary = SnapshotWriter::new(self.options).write(&built.dictionary, snapshot_path)?;

        Ok(ConversionReport {
            source_records,
            num_entries: summary.num_entries,
            duplicates: built.duplicates,
            num_blocks: summary.num_blocks,
            bytes_written: summary.bytes_written,
        })
    }
}
