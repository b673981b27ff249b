use std::path::Path;
use std::sync::Arc;

use log::warn;
use serde::Serialize;
use thiserror::Error;

use lexicon::api::{LookupResponse, NotFoundResponse, Stats, SuggestResponse};
use lexicon::client::{ClientError, DictionaryClient};
use lexicon::config::{ConfigError, ServerConfig};
use lexicon::dict::{utils, AutoLoader, CompressionType, Converter, DictError, DictionaryService, JsonLoader, Loader, SnapshotReader, WriteOptions};
use lexicon::server::{self, ServerError};

use crate::cli::{Cli, Commands, SourceArgs};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dict(#[from] DictError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Server(#[from] ServerError),
    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

pub async fn run(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Serve {
            config,
            dict,
            addr,
            static_dir,
            no_static,
            encoding,
        } => {
            let mut server_config = match config {
                Some(path) => ServerConfig::load(&path)?,
                None => ServerConfig::default(),
            };
            if let Some(dict) = dict {
                server_config.dict = dict;
            }
            if let Some(addr) = addr {
                server_config.addr = addr;
            }
            if let Some(dir) = static_dir {
                server_config.static_dir = Some(dir);
            }
            if no_static {
                server_config.static_dir = None;
            }
            if encoding.is_some() {
                server_config.encoding = encoding;
            }
            let service = server::load_service(&server_config)?;
            server::serve(&server_config, Arc::new(service)).await?;
            Ok(())
        }
        Commands::Convert {
            input,
            output,
            encoding,
            block_entries,
            level,
            no_compress,
        } => {
            let encoding = encoding.as_deref().map(utils::parse_encoding).transpose()?;
            let options = WriteOptions {
                compression: if no_compress { CompressionType::None } else { CompressionType::Zlib },
                level,
                entries_per_block: block_entries,
            };
            let report = Converter::new(encoding, options).convert(&input, &output)?;
            if json {
                print_json(&report)?;
            } else {
                println!(
                    "Successfully converted and saved to {} ({} words, {} blocks, compressed size: {:.2} MB)",
                    output.display(),
                    report.num_entries,
                    report.num_blocks,
                    report.bytes_written as f64 / 1024.0 / 1024.0
                );
                if report.duplicates > 0 {
                    println!("{} duplicate source records replaced earlier entries", report.duplicates);
                }
            }
            Ok(())
        }
        Commands::Lookup { word, source } => {
            let meanings = match &source.remote {
                Some(url) => {
                    let client = DictionaryClient::new(url)?;
                    client.lookup(&word).await.unwrap_or_else(|e| {
                        warn!("Failed to fetch word: {}", e);
                        None
                    })
                }
                None => load_local(&source)?.lookup(&word).map(<[String]>::to_vec),
            };
            print_lookup(&word, meanings, json)
        }
        Commands::Suggest { prefix, limit, source } => {
            let suggestions = match &source.remote {
                Some(url) => {
                    let client = DictionaryClient::new(url)?;
                    let limit = usize::try_from(limit).unwrap_or(0);
                    client.suggest(&prefix, limit).await.unwrap_or_else(|e| {
                        warn!("Failed to fetch suggestions: {}", e);
                        Vec::new()
                    })
                }
                None => load_local(&source)?.suggest(&prefix, limit),
            };
            if json {
                print_json(&SuggestResponse {
                    count: suggestions.len(),
                    prefix,
                    suggestions,
                })?;
            } else {
                for word in suggestions {
                    println!("{}", word);
                }
            }
            Ok(())
        }
        Commands::Stats { source } => {
            let stats = match &source.remote {
                Some(url) => DictionaryClient::new(url)?.stats().await?,
                None => Stats {
                    total_words: load_local(&source)?.count(),
                },
            };
            if json {
                print_json(&stats)?;
            } else {
                println!("Total words: {}", stats.total_words);
            }
            Ok(())
        }
        Commands::Info { snapshot } => print_info(&snapshot, json),
    }
}

fn load_local(source: &SourceArgs) -> Result<DictionaryService, CliError> {
    let encoding = source.encoding.as_deref().map(utils::parse_encoding).transpose()?;
    let loader = AutoLoader {
        json: JsonLoader { encoding },
    };
    Ok(DictionaryService::new(loader.load(&source.dict)?))
}

fn print_lookup(word: &str, meanings: Option<Vec<String>>, json: bool) -> Result<(), CliError> {
    match (meanings, json) {
        (Some(meanings), true) => print_json(&LookupResponse {
            word: word.to_string(),
            meanings,
        })?,
        (None, true) => print_json(&NotFoundResponse {
            error: "Word not found".to_string(),
            word: word.to_string(),
        })?,
        (Some(meanings), false) => {
            println!("Word: {}", word);
            println!("Meanings:");
            for (i, meaning) in meanings.iter().enumerate() {
                println!("  {}. {}", i + 1, meaning);
            }
        }
        (None, false) => println!("Word '{}' not found in dictionary", word),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct BlockReport {
    entries: u64,
    stored_bytes: u64,
    decompressed_bytes: u64,
    offset: u64,
}

#[derive(Debug, Serialize)]
struct InfoReport {
    version: u16,
    entries: u64,
    compression: String,
    blocks: Vec<BlockReport>,
}

fn print_info(path: &Path, json: bool) -> Result<(), CliError> {
    let reader = SnapshotReader::open(path)?;
    let report = InfoReport {
        version: reader.header.version,
        entries: reader.num_entries(),
        compression: reader.header.compression.to_string(),
        blocks: reader
            .blocks()
            .iter()
            .map(|b| BlockReport {
                entries: b.num_entries,
                stored_bytes: b.compressed_size,
                decompressed_bytes: b.decompressed_size,
                offset: b.file_offset,
            })
            .collect(),
    };

    if json {
        return print_json(&report);
    }

    println!("Snapshot: {}", path.display());
    println!("{}", "=".repeat(60));
    println!("  Version: {}", report.version);
    println!("  Compression: {}", report.compression);
    println!("  Total entries: {}", report.entries);
    println!("  Blocks: {}", report.blocks.len());
    let stored: u64 = report.blocks.iter().map(|b| b.stored_bytes).sum();
    let raw: u64 = report.blocks.iter().map(|b| b.decompressed_bytes).sum();
    println!("  Block data: {} bytes stored, {} bytes decompressed", stored, raw);

    println!("\nSample entries (first 10):");
    for (i, entry) in reader.iter_entries().take(10).enumerate() {
        let entry = entry?;
        println!("  {}. {} ({} meanings)", i + 1, entry.word, entry.meanings.len());
    }
    if report.entries > 10 {
        println!("  ... and {} more", report.entries - 10);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
