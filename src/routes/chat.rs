use axum::{Json, body::Bytes, extract::State};
use serde_json::Value;

use crate::{
    error::AppError,
    message::{HablarRequest, HablarResponse},
    services::chatbot::generate_reply,
    state::SharedState,
};

pub const EMPTY_MESSAGE: &str = "Mensaje vacío";
pub const INVALID_BODY: &str = "Cuerpo JSON inválido";

/// `POST /hablar`: relay `mensaje` to the character and return its cleaned text and audio URL.
pub async fn hablar_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<HablarResponse>, AppError> {
    let payload = parse_body(&body)?;

    let mensaje = payload.mensaje.as_deref().map(str::trim).unwrap_or_default();
    if mensaje.is_empty() {
        return Err(AppError::BadRequest(EMPTY_MESSAGE.to_string()));
    }

    match generate_reply(&state, mensaje).await {
        Ok(reply) => Ok(Json(reply)),
        Err(err) => {
            tracing::error!(error = %err, "relay failed");
            Err(err.for_client(state.config.expose_upstream_errors))
        }
    }
}

// Parsed by hand so a missing content-type header is not a rejection. Only a
// JSON object is accepted; serde would otherwise read `["hola"]` as a struct.
fn parse_body(body: &[u8]) -> Result<HablarRequest, AppError> {
    let invalid = |reason: &dyn std::fmt::Display| {
        tracing::warn!(%reason, "rejected /hablar body");
        AppError::BadRequest(INVALID_BODY.to_string())
    };

    let value: Value = serde_json::from_slice(body).map_err(|e| invalid(&e))?;
    if !value.is_object() {
        return Err(invalid(&"body is not a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| invalid(&e))
}
