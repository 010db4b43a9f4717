pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod response;
pub mod services;
pub mod store;

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub store: store::DataStore,
    pub config: config::Config,
}

/// Собирает роутер целиком: API, раздача постеров, слои.
/// Используется и в main, и в интеграционных тестах.
pub fn app(state: Arc<AppState>) -> Router {
    let files_dir = state.config.files.dir.clone();
    Router::new()
        .route("/", get(|| async { "Cinema API v1.0" }))
        .route("/health", get(|| async { "OK" }))
        .merge(controllers::routes())
        .nest_service("/files", ServeDir::new(files_dir))
        .with_state(state)
        // постеры приходят multipart-формой
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
