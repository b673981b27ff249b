use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::debug;
use serde::Deserialize;

use crate::api::{HealthResponse, LookupResponse, NotFoundResponse, Stats, SuggestResponse};
use crate::dict::DictionaryService;

/// Failures a handler reports to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    WordNotFound(String),
    BadRequest(&'static str),
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::WordNotFound(word) => (
                StatusCode::NOT_FOUND,
                Json(NotFoundResponse {
                    error: "Word not found".to_string(),
                    word,
                }),
            )
                .into_response(),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message).into_response(),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    limit: Option<String>,
}

/// `GET /api/v1/words/{word}`
pub async fn lookup_word(
    State(service): State<Arc<DictionaryService>>,
    Path(word): Path<String>,
) -> Result<Json<LookupResponse>, ApiError> {
    match service.lookup(&word) {
        Some(meanings) => Ok(Json(LookupResponse {
            meanings: meanings.to_vec(),
            word,
        })),
        None => {
            debug!("Lookup miss: {:?}", word);
            Err(ApiError::WordNotFound(word))
        }
    }
}

/// `GET /api/v1/words/` with an empty word segment.
pub async fn missing_word() -> ApiError {
    ApiError::BadRequest("Word parameter is required")
}

/// `GET /api/v1/suggest/{prefix}?limit=N`
pub async fn suggest_words(
    State(service): State<Arc<DictionaryService>>,
    Path(prefix): Path<String>,
    Query(params): Query<SuggestParams>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let limit = match params.limit.as_deref() {
        None | Some("") => 0,
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| ApiError::BadRequest("Invalid limit parameter"))?,
    };

    let suggestions = service.suggest(&prefix, limit);
    Ok(Json(SuggestResponse {
        count: suggestions.len(),
        prefix,
        suggestions,
    }))
}

/// `GET /api/v1/suggest/` with an empty prefix segment.
pub async fn missing_prefix() -> ApiError {
    ApiError::BadRequest("Prefix parameter is required")
}

/// `GET /api/v1/stats`
pub async fn get_stats(State(service): State<Arc<DictionaryService>>) -> Json<Stats> {
    Json(Stats {
        total_words: service.count(),
    })
}

/// `GET /health`
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Unknown paths under `/api`, kept out of the static fallback.
pub async fn api_not_found() -> ApiError {
    ApiError::NotFound
}
