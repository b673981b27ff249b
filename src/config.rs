//! Server configuration, read from an optional JSON file and overridden by CLI flags.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dict::SuggestLimits;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid listen address {0:?}")]
    Addr(String),
    #[error("suggest limits are inconsistent: default {default} must be between 1 and max {max}")]
    Limits { default: usize, max: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, `host:port`. A bare `:port` binds every interface.
    pub addr: String,
    /// Snapshot or JSON source document to serve.
    pub dict: PathBuf,
    /// Built frontend to serve at `/`. Ignored when the directory is missing.
    pub static_dir: Option<PathBuf>,
    /// Encoding label for JSON source documents without a byte order mark.
    pub encoding: Option<String>,
    pub suggest_default_limit: usize,
    pub suggest_max_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let limits = SuggestLimits::default();
        Self {
            addr: ":8080".to_string(),
            dict: PathBuf::from("dictionary.lxdb"),
            static_dir: Some(PathBuf::from("static")),
            encoding: None,
            suggest_default_limit: limits.default,
            suggest_max_limit: limits.max,
        }
    }
}

impl ServerConfig {
    /// Reads a config file. Missing keys take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Config loaded from {}", path.display());
        Ok(config)
    }

    /// Parses [`addr`](Self::addr) into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.addr.trim();
        let full = if addr.starts_with(':') {
            format!("0.0.0.0{}", addr)
        } else {
            addr.to_string()
        };
        full.parse().map_err(|_| ConfigError::Addr(self.addr.clone()))
    }

    pub fn suggest_limits(&self) -> Result<SuggestLimits, ConfigError> {
        if self.suggest_default_limit == 0 || self.suggest_default_limit > self.suggest_max_limit {
            return Err(ConfigError::Limits {
                default: self.suggest_default_limit,
                max: self.suggest_max_limit,
            });
        }
        Ok(SuggestLimits {
            default: self.suggest_default_limit,
            max: self.suggest_max_limit,
        })
    }
}
