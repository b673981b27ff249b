//! Sequential access to snapshot entries.
//!
//! # Example
//! ```no_run
//! # use lexicon::SnapshotReader;
//! let reader = SnapshotReader::open("dictionary.lxdb").unwrap();
//! for entry in reader.iter_entries() {
//!     let entry = entry.unwrap();
//!     println!("{}: {} meanings", entry.word, entry.meanings.len());
//! }
//! ```

use std::vec::IntoIter;

use super::reader::SnapshotReader;
use super::types::error::Result;
use super::types::models::Entry;

/// Iterator over snapshot entries in stored (byte-sorted) order.
///
/// Only one decoded block is held in memory at a time. After an error the
/// iterator is fused and yields `None`.
///
/// Created by [`SnapshotReader::iter_entries()`](crate::SnapshotReader::iter_entries).
pub struct EntryIterator<'a> {
    reader: &'a SnapshotReader,
    block_idx: usize,
    current: IntoIter<Entry>,
    failed: bool,
}

impl<'a> EntryIterator<'a> {
    pub(super) fn new(reader: &'a SnapshotReader) -> Self {
        Self {
            reader,
            block_idx: 0,
            current: Vec::new().into_iter(),
            failed: false,
        }
    }
}

impl Iterator for EntryIterator<'_> {
    type Item = Result<Entry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if let Some(entry) = self.current.next() {
                return Some(Ok(entry));
            }

            if self.block_idx >= self.reader.num_blocks() {
                return None;
            }

            match self.reader.read_block(self.block_idx) {
                Ok(entries) => {
                    self.current = entries.into_iter();
                    self.block_idx += 1;
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
