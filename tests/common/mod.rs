#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use lexicon::Dictionary;
use tempfile::TempDir;

/// Words of the fixture corpus with their meanings, in source order.
pub const FIXTURE_WORDS: &[(&str, &[&str])] = &[
    ("apple", &["A round fruit.", "A technology company."]),
    ("Apply", &["To make a formal request."]),
    ("apricot", &["A small orange fruit."]),
    ("banana", &["A long yellow fruit."]),
    ("café", &["A small restaurant."]),
    ("Zebra", &["A striped animal."]),
    ("empty", &[]),
];

pub fn fixture_json() -> String {
    let words: Vec<serde_json::Value> = FIXTURE_WORDS
        .iter()
        .map(|(word, meanings)| serde_json::json!({ "EnglishWord": word, "Meanings": meanings }))
        .collect();
    serde_json::json!({ "TotalUniqueWords": FIXTURE_WORDS.len(), "Words": words }).to_string()
}

pub fn fixture_dictionary() -> Dictionary {
    FIXTURE_WORDS
        .iter()
        .map(|(word, meanings)| (word.to_string(), meanings.iter().map(|m| m.to_string()).collect()))
        .collect()
}

/// A scratch directory holding the fixture source document.
pub struct Workspace {
    tmp: TempDir,
    pub source: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let source = tmp.path().join("words.json");
        fs::write(&source, fixture_json()).expect("write fixture source");
        Self { tmp, source }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }
}
