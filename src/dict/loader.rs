//! Loading dictionaries from disk.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use encoding_rs::Encoding;
use log::info;

use super::format::header;
use super::reader::SnapshotReader;
use super::source::SourceDocument;
use super::types::error::Result;
use super::types::models::Dictionary;

/// A source of dictionaries.
pub trait Loader {
    fn load(&self, path: &Path) -> Result<Dictionary>;
}

/// Loads block-compressed snapshots.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnapshotLoader;

impl Loader for SnapshotLoader {
    fn load(&self, path: &Path) -> Result<Dictionary> {
        SnapshotReader::open(path)?.into_dictionary()
    }
}

/// Loads JSON source documents directly, without converting them first.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader {
    pub encoding: Option<&'static Encoding>,
}

impl Loader for JsonLoader {
    fn load(&self, path: &Path) -> Result<Dictionary> {
        Ok(SourceDocument::read(path, self.encoding)?.into_dictionary().dictionary)
    }
}

/// Picks the snapshot or JSON loader by sniffing the file's magic bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoLoader {
    pub json: JsonLoader,
}

impl Loader for AutoLoader {
    fn load(&self, path: &Path) -> Result<Dictionary> {
        let mut magic = Vec::with_capacity(4);
        File::open(path)?.take(4).read_to_end(&mut magic)?;
        let dict = if header::has_magic(&magic) {
            SnapshotLoader.load(path)?
        } else {
            info!("{} is not a snapshot, reading it as a JSON source document", path.display());
            self.json.load(path)?
        };
        info!("Dictionary loaded: {} words", dict.len());
        Ok(dict)
    }
}
