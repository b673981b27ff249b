use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::info;

use super::format::{content, header, index};
use super::iter::EntryIterator;
use super::types::error::{DictError, Result};
use super::types::models::*;

/// Random-access reader for dictionary snapshot files.
///
/// Opening a snapshot parses and validates the header and block index only;
/// entry blocks are decoded on demand.
#[derive(Debug)]
pub struct SnapshotReader {
    file: Arc<Mutex<File>>,
    pub header: SnapshotHeader,
    blocks: Vec<BlockMeta>,
}

impl SnapshotReader {
    /// Opens a snapshot from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - File cannot be opened
    /// - The magic, version or compression type is not recognised
    /// - Header or index checksum verification fails
    /// - The block index disagrees with the header entry count
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening dictionary snapshot: {}", path.display());
        let mut file = BufReader::new(File::open(path)?);

        let file_len = file.get_ref().metadata()?.len();
        let header = header::parse(&mut file)?;
        let data_offset = ((HEADER_LEN + 4) as u64).saturating_add(index::encoded_len(header.num_blocks));
        if data_offset > file_len {
            return Err(DictError::SizeMismatch {
                context: format!("block index of {}", path.display()),
                expected: data_offset,
                found: file_len,
            });
        }
        let blocks = index::parse(&mut file, &header, data_offset)?;

        let data_end = blocks
            .last()
            .map(|b| b.file_offset + b.compressed_size)
            .unwrap_or(data_offset);
        if data_end > file_len {
            return Err(DictError::SizeMismatch {
                context: format!("snapshot {}", path.display()),
                expected: data_end,
                found: file_len,
            });
        }

        info!(
            "Snapshot opened: {} entries in {} blocks ({} compression)",
            header.num_entries,
            blocks.len(),
            header.compression
        );

        Ok(Self {
            file: Arc::new(Mutex::new(file.into_inner())),
            header,
            blocks,
        })
    }

    /// Returns the total number of entries in the snapshot.
    pub fn num_entries(&self) -> u64 {
        self.header.num_entries
    }

    /// Returns the number of entry blocks.
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Metadata of every block, in file order.
    pub fn blocks(&self) -> &[BlockMeta] {
        &self.blocks
    }

    /// Reads and decodes all entries of one block.
    pub fn read_block(&self, block_index: usize) -> Result<Vec<Entry>> {
        let block_meta = self
            .blocks
            .get(block_index)
            .ok_or_else(|| DictError::InvalidFormat(format!("Invalid block index: {}", block_index)))?;
        let payload = self.read_and_decode_block(block_meta)?;
        content::parse_entries(&payload, block_meta.num_entries)
    }

    /// Returns an iterator over every entry, decoding one block at a time.
    pub fn iter_entries(&self) -> EntryIterator<'_> {
        EntryIterator::new(self)
    }

    /// Decodes every block into an in-memory [`Dictionary`].
    pub fn into_dictionary(self) -> Result<Dictionary> {
        let mut dict = Dictionary::with_capacity(self.header.num_entries.min(1 << 24) as usize);
        for entry in self.iter_entries() {
            let entry = entry?;
            dict.insert(entry.word, entry.meanings);
        }
        if dict.len() as u64 != self.header.num_entries {
            return Err(DictError::CountMismatch {
                item_type: "distinct words",
                expected: self.header.num_entries,
                found: dict.len() as u64,
            });
        }
        Ok(dict)
    }

    fn read_and_decode_block(&self, block_meta: &BlockMeta) -> Result<Vec<u8>> {
        let mut raw_block = vec![0u8; block_meta.compressed_size as usize];
        {
            let mut file = self.file.lock().map_err(|_| DictError::LockPoisoned)?;
            file.seek(SeekFrom::Start(block_meta.file_offset))?;
            file.read_exact(&mut raw_block)?;
        }
        content::decode_block(&raw_block, block_meta.decompressed_size)
    }
}
