// src/routes/mod.rs
pub mod chat;
pub mod pages;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    routing::{get, post},
};
use chat::hablar_handler;
use pages::root_handler;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router(static_dir: impl AsRef<Path>) -> Router<SharedState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/hablar", post(hablar_handler))
        .route("/health", get(|| async { "OK" }))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
}
