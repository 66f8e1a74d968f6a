// src/routes/pages.rs
use std::io::ErrorKind;

use axum::{extract::State, response::Html};

use crate::{error::AppError, state::SharedState};

pub const PLACEHOLDER_PAGE: &str = "<h1>Servidor de voz y texto activo</h1>";

/// Serve `index.html` from the static directory, or a placeholder when there is none.
pub async fn root_handler(State(state): State<SharedState>) -> Result<Html<String>, AppError> {
    let index_path = state.config.static_dir.join("index.html");
    match tokio::fs::read_to_string(&index_path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(Html(PLACEHOLDER_PAGE.to_string())),
        Err(e) => {
            tracing::error!(path = %index_path.display(), error = %e, "failed to read index page");
            Err(AppError::Internal(format!("no se pudo leer index.html: {e}"))
                .for_client(state.config.expose_upstream_errors))
        }
    }
}
