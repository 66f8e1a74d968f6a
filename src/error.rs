// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::ConfigError;
use crate::message::ErrorBody;
use crate::services::character_ai::UpstreamError;

pub const GENERIC_INTERNAL_ERROR: &str = "Error interno del servidor";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("la sesión con el servicio de personajes no está inicializada")]
    SessionUnavailable,
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Hide server-side detail from callers. Client errors pass through untouched.
    pub fn for_client(self, expose_detail: bool) -> Self {
        match self {
            AppError::BadRequest(_) => self,
            _ if expose_detail => self,
            _ => AppError::Internal(GENERIC_INTERNAL_ERROR.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
