//! Snapshot writer.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::format::{content, header, index};
use super::types::error::{DictError, Result};
use super::types::models::*;

/// Summary of a written snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub num_entries: u64,
    pub num_blocks: u64,
    pub bytes_written: u64,
}

/// Writes a [`Dictionary`] as a block-compressed snapshot.
#[derive(Debug, Default)]
pub struct SnapshotWriter {
    options: WriteOptions,
}

impl SnapshotWriter {
    pub fn new(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Writes `dict` to `path`, replacing any existing file.
    ///
    /// Entries are stored in ascending byte order of the word so the output
    /// is deterministic for a given dictionary and option set. The snapshot is
    /// encoded in memory and renamed into place from a sibling file, so a
    /// failed write leaves an existing file at `path` untouched.
    pub fn write(&self, dict: &Dictionary, path: impl AsRef<Path>) -> Result<WriteSummary> {
        let path = path.as_ref();
        let mut buf = Vec::new();
        let summary = self.write_to(dict, &mut buf)?;

        let staging = staging_path(path);
        if let Err(e) = fs::write(&staging, &buf).and_then(|_| fs::rename(&staging, path)) {
            let _ = fs::remove_file(&staging);
            return Err(e.into());
        }
        info!(
            "Wrote snapshot {}: {} entries, {} blocks, {} bytes",
            path.display(),
            summary.num_entries,
            summary.num_blocks,
            summary.bytes_written
        );
        Ok(summary)
    }

    /// Writes `dict` into any writer.
    pub fn write_to<W: Write>(&self, dict: &Dictionary, out: &mut W) -> Result<WriteSummary> {
        if self.options.entries_per_block == 0 {
            return Err(DictError::InvalidFormat("entries_per_block must be at least 1".to_string()));
        }

        let mut words: Vec<&String> = dict.keys().collect();
        words.sort_unstable();

        let mut blocks = Vec::new();
        let mut stored = Vec::new();
        let mut first_entry = 0u64;
        for chunk in words.chunks(self.options.entries_per_block) {
            let entries: Vec<Entry> = chunk
                .iter()
                .map(|word| Entry::new(word.as_str(), dict[*word].clone()))
                .collect();
            let (block, decompressed_size) =
                content::encode_block(&entries, self.options.compression, self.options.level)?;
            debug!(
                "Encoded block {}: {} entries, {} -> {} bytes",
                blocks.len(),
                entries.len(),
                decompressed_size,
                block.len()
            );
            blocks.push(BlockMeta {
                num_entries: entries.len() as u64,
                compressed_size: block.len() as u64,
                decompressed_size,
                file_offset: 0,
                first_entry,
            });
            first_entry += entries.len() as u64;
            stored.push(block);
        }

        let snapshot_header = SnapshotHeader {
            version: FORMAT_VERSION,
            num_entries: words.len() as u64,
            num_blocks: blocks.len() as u64,
            compression: self.options.compression,
        };
        header::write(out, &snapshot_header)?;
        index::write(out, &blocks)?;

        let mut bytes_written = (HEADER_LEN + 4) as u64 + index::encoded_len(blocks.len() as u64);
        for block in &stored {
            out.write_all(block)?;
            bytes_written += block.len() as u64;
        }

        Ok(WriteSummary {
            num_entries: snapshot_header.num_entries,
            num_blocks: snapshot_header.num_blocks,
            bytes_written,
        })
    }
}

/// `dir/name` -> `dir/.name.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or_default());
    name.push(".tmp");
    path.with_file_name(name)
}
