//! # lexicon
//!
//! A dictionary lookup and prefix-suggestion service.
//!
//! Dictionaries are converted from a JSON source document into a compact,
//! block-compressed snapshot, loaded into memory once, and served over a
//! small HTTP API with exact lookups, case-insensitive prefix suggestions and
//! corpus statistics. A typed client for the same API is included.
pub mod api;
pub mod client;
pub mod config;
pub mod dict;
pub mod server;

// Re-export the main types for convenience
pub use client::DictionaryClient;
pub use config::ServerConfig;
pub use dict::{
    AutoLoader, ConversionReport, Converter, DictError, Dictionary, DictionaryService, Entry, Loader,
    SnapshotReader, SnapshotWriter, SuggestLimits, WriteOptions,
};
