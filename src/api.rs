//! JSON bodies exchanged over the `/api/v1` HTTP interface.
//!
//! The server serialises these; the client deserialises them leniently, so a
//! response missing `suggestions` or `meanings` decodes as an empty list.

use serde::{Deserialize, Serialize};

pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default)]
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub error: String,
    pub word: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestResponse {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_words: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
