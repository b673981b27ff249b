use std::path::Path;
use std::sync::Arc;

use axum::middleware::from_fn;
use axum::routing::{any, get};
use axum::Router;
use log::{info, warn};
use tower_http::services::{ServeDir, ServeFile};

use super::handlers;
use super::middleware;
use crate::dict::DictionaryService;

/// Builds the application router.
///
/// When `static_dir` exists its files are served at `/`, and unknown
/// non-API paths fall back to `index.html` for client-side routing.
/// Requests pass through request logging first, then CORS.
pub fn router(service: Arc<DictionaryService>, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/v1/words/", get(handlers::missing_word))
        .route("/api/v1/words/{word}", get(handlers::lookup_word))
        .route("/api/v1/suggest/", get(handlers::missing_prefix))
        .route("/api/v1/suggest/{prefix}", get(handlers::suggest_words))
        .route("/api/v1/stats", get(handlers::get_stats))
        .route("/api", any(handlers::api_not_found))
        .route("/api/{*rest}", any(handlers::api_not_found))
        .with_state(service);

    let app = match static_dir {
        Some(dir) if dir.is_dir() => {
            info!("Serving static files from: {}", dir.display());
            let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            app.fallback_service(spa)
        }
        Some(dir) => {
            warn!("Static directory {} not found, serving the API only", dir.display());
            app
        }
        None => app,
    };

    app.layer(middleware::cors()).layer(from_fn(middleware::log_requests))
}
