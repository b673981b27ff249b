//! JSON source documents.
//!
//! The source format is the export the snapshot is built from:
//!
//! ```json
//! { "TotalUniqueWords": 2,
//!   "Words": [ { "EnglishWord": "apple", "Meanings": ["a fruit"] } ] }
//! ```

use std::fs;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};

use super::types::error::Result;
use super::types::models::Dictionary;

/// The top-level source document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Capacity hint written by the exporter; not trusted as a count.
    #[serde(rename = "TotalUniqueWords", default)]
    pub total_unique_words: usize,
    #[serde(rename = "Words", default, deserialize_with = "null_as_empty")]
    pub words: Vec<SourceWord>,
}

/// A single word record in the source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceWord {
    #[serde(rename = "EnglishWord")]
    pub english_word: String,
    #[serde(rename = "Meanings", default, deserialize_with = "null_as_empty")]
    pub meanings: Vec<String>,
}

/// Accepts `null` wherever a list is expected and reads it as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of folding a source document into a [`Dictionary`].
#[derive(Debug)]
pub struct BuiltDictionary {
    pub dictionary: Dictionary,
    /// Number of source records that replaced an earlier record for the same word.
    pub duplicates: usize,
}

impl SourceDocument {
    /// Reads a source document from disk.
    ///
    /// Priority for determining text encoding (highest → lowest):
    /// 1. A byte order mark at the start of the file
    /// 2. `encoding` (explicit override provided by caller/CLI)
    /// 3. UTF-8
    pub fn read(path: impl AsRef<Path>, encoding: Option<&'static Encoding>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!("Read source document {} ({} bytes)", path.display(), bytes.len());
        Self::from_bytes(&bytes, encoding)
    }

    /// Decodes and parses a source document held in memory.
    pub fn from_bytes(bytes: &[u8], encoding: Option<&'static Encoding>) -> Result<Self> {
        let fallback = encoding.unwrap_or(UTF_8);
        let (text, used, had_errors) = fallback.decode(bytes);
        if used != fallback {
            debug!("Byte order mark selects {} over {}", used.name(), fallback.name());
        }
        if had_errors {
            warn!("Source document contains byte sequences invalid in {}; replaced with U+FFFD", used.name());
        }
        Ok(serde_json::from_str(&text)?)
    }

    /// Folds the word list into a map. Later records for the same word replace earlier ones.
    pub fn into_dictionary(self) -> BuiltDictionary {
        let mut dictionary = Dictionary::with_capacity(self.total_unique_words.max(self.words.len()).min(1 << 24));
        let mut duplicates = 0;
        for word in self.words {
            if dictionary.insert(word.english_word, word.meanings).is_some() {
                duplicates += 1;
            }
        }
        if duplicates > 0 {
            debug!("{} duplicate source records replaced earlier entries", duplicates);
        }
        BuiltDictionary { dictionary, duplicates }
    }
}
