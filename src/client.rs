//! Typed HTTP client for the `/api/v1` interface.

use std::time::Duration;

use log::debug;
use reqwest::{StatusCode, Url};
use thiserror::Error;

use crate::api::{LookupResponse, Stats, SuggestResponse, API_PREFIX};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid base URL {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: StatusCode, url: Url },
}

pub type Result<T> = std::result::Result<T, ClientError>;

/// Client for a remote dictionary service.
///
/// Requests are independent: nothing is retried, cancelled or ordered.
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    http: reqwest::Client,
    base: Url,
}

impl DictionaryClient {
    /// Creates a client for the service rooted at `base_url`.
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Self::with_http(base_url, http)
    }

    pub fn with_http(base_url: &str, http: reqwest::Client) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| ClientError::BaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::BaseUrl {
                url: base_url.to_string(),
                reason: "URL cannot be a base".to_string(),
            });
        }
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/v1/stats`
    pub async fn stats(&self) -> Result<Stats> {
        let url = self.endpoint(&["stats"]);
        let response = self.http.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url,
            });
        }
        Ok(response.json().await?)
    }

    /// `GET /api/v1/suggest/{prefix}?limit=N`
    ///
    /// An empty prefix returns no suggestions without contacting the server.
    pub async fn suggest(&self, prefix: &str, limit: usize) -> Result<Vec<String>> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        let mut url = self.endpoint(&["suggest", prefix]);
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let response = self.http.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status {
                status: response.status(),
                url,
            });
        }
        let body: SuggestResponse = response.json().await?;
        Ok(body.suggestions)
    }

    /// `GET /api/v1/words/{word}`
    ///
    /// Returns `None` for a blank word (without a request) and for any
    /// non-2xx response.
    pub async fn lookup(&self, word: &str) -> Result<Option<Vec<String>>> {
        if word.trim().is_empty() {
            return Ok(None);
        }
        let url = self.endpoint(&["words", word]);
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            debug!("Lookup of {:?} answered {}", word, response.status());
            return Ok(None);
        }
        let body: LookupResponse = response.json().await?;
        Ok(Some(body.meanings))
    }

    /// Joins `segments` under the API prefix, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty();
            path.extend(API_PREFIX.trim_start_matches('/').split('/'));
            path.extend(segments);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_percent_encoded() {
        let client = DictionaryClient::new("http://localhost:8080").unwrap();
        let url = client.endpoint(&["words", "ice cream/cone?"]);
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/words/ice%20cream%2Fcone%3F");
    }

    #[test]
    fn base_path_is_kept() {
        let client = DictionaryClient::new("https://example.org/dict/").unwrap();
        assert_eq!(client.endpoint(&["stats"]).as_str(), "https://example.org/dict/api/v1/stats");
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(matches!(DictionaryClient::new("/api"), Err(ClientError::BaseUrl { .. })));
    }
}
