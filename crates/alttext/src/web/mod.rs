//! Web layer: shared state, routes, handlers and HTML rendering.

mod handlers;
mod render;

use alttext_core::{Config, Credentials, EnvFile, Generator, Provider};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Provider selected at startup
    pub provider: Provider,
    pub generator: Generator,
    /// Updated in place when a key is saved through the UI.
    pub credentials: Arc<RwLock<Credentials>>,
    pub env_file: EnvFile,
}

impl AppState {
    pub fn new(
        config: Config,
        provider: Provider,
        credentials: Credentials,
        env_file: EnvFile,
    ) -> Self {
        let generator = Generator::new(config.providers.clone());
        Self {
            config: Arc::new(config),
            provider,
            generator,
            credentials: Arc::new(RwLock::new(credentials)),
            env_file,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    let form_limit = state.config.limits.form_limit_bytes();

    Router::new()
        .route("/", get(handlers::home))
        .route("/upload", post(handlers::upload))
        .route("/saveApiKey", post(handlers::save_api_key))
        .layer(DefaultBodyLimit::max(form_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
