//! HTTP front end for a [`DictionaryService`].
//!
//! ```text
//! GET /health                        -> {"status":"healthy"}
//! GET /api/v1/words/{word}           -> {"word","meanings"} | 404
//! GET /api/v1/suggest/{prefix}?limit -> {"prefix","suggestions","count"}
//! GET /api/v1/stats                  -> {"total_words"}
//! ```

mod handlers;
mod middleware;
mod router;

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use log::{info, warn};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServerConfig};
use crate::dict::{utils, AutoLoader, DictError, DictionaryService, JsonLoader, Loader};

pub use handlers::ApiError;
pub use router::router;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load dictionary: {0}")]
    Dict(#[from] DictError),
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Loads the dictionary named by `config` and wraps it in a service.
pub fn load_service(config: &ServerConfig) -> Result<DictionaryService, ServerError> {
    let encoding = config.encoding.as_deref().map(utils::parse_encoding).transpose()?;
    let loader = AutoLoader {
        json: JsonLoader { encoding },
    };
    let dict = loader.load(&config.dict)?;
    Ok(DictionaryService::with_limits(dict, config.suggest_limits()?))
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &ServerConfig, service: Arc<DictionaryService>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let app = router(service, config.static_dir.as_deref());
    let listener = TcpListener::bind(addr).await?;

    info!("Starting server on {}", listener.local_addr()?);
    info!("API endpoints:");
    info!("  GET /health - Health check");
    info!("  GET /api/v1/words/{{word}} - Lookup word");
    info!("  GET /api/v1/suggest/{{prefix}} - Autocomplete suggestions");
    info!("  GET /api/v1/stats - Get statistics");

    run(listener, app, shutdown_signal()).await?;
    Ok(())
}

/// Serves `app` on an already bound listener until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            warn!("Failed to listen for Ctrl-C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await
        }
    }
}
