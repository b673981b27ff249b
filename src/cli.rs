use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub const DEFAULT_DICT: &str = "dictionary.lxdb";

#[derive(Parser, Debug)]
#[command(name = "lexicon", version, about = "Dictionary lookup and prefix-suggestion service")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        #[arg(long, help = "JSON config file; flags override its values")]
        config: Option<PathBuf>,
        #[arg(long, env = "LEXICON_DICT", help = "Snapshot or JSON source document to serve")]
        dict: Option<PathBuf>,
        #[arg(long, env = "LEXICON_ADDR", help = "Listen address, e.g. :8080 or 127.0.0.1:8080")]
        addr: Option<String>,
        #[arg(long = "static", env = "LEXICON_STATIC", help = "Directory for static files (frontend)")]
        static_dir: Option<PathBuf>,
        #[arg(long, default_value_t = false, help = "Do not serve static files")]
        no_static: bool,
        #[arg(long, help = "Encoding of a JSON source document without a byte order mark")]
        encoding: Option<String>,
    },
    /// Convert a JSON source document into a snapshot
    Convert {
        input: PathBuf,
        output: PathBuf,
        #[arg(long, help = "Encoding of the source document when it has no byte order mark")]
        encoding: Option<String>,
        #[arg(long, default_value_t = lexicon::dict::types::models::DEFAULT_ENTRIES_PER_BLOCK)]
        block_entries: usize,
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(0..=9))]
        level: u32,
        #[arg(long, default_value_t = false, help = "Store blocks uncompressed")]
        no_compress: bool,
    },
    /// Look up the meanings of a word
    Lookup {
        word: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Suggest words starting with a prefix
    Suggest {
        prefix: String,
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show the number of words
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show snapshot header and block layout
    Info {
        snapshot: PathBuf,
    },
}

/// Where query commands read the dictionary from.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[arg(long, env = "LEXICON_DICT", default_value = DEFAULT_DICT, help = "Snapshot or JSON source document")]
    pub dict: PathBuf,
    #[arg(long, env = "LEXICON_REMOTE", help = "Base URL of a running server; takes precedence over --dict")]
    pub remote: Option<String>,
    #[arg(long, help = "Encoding of a JSON source document without a byte order mark")]
    pub encoding: Option<String>,
}
