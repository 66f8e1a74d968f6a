// src/services/chatbot.rs
use crate::{
    error::AppError,
    message::HablarResponse,
    services::{persona::build_prompt, sanitizer::sanitize},
    state::AppState,
};

/// Send one user message through the shared chat and voice the answer.
///
/// `mensaje` must already be trimmed and non-empty.
pub async fn generate_reply(state: &AppState, mensaje: &str) -> Result<HablarResponse, AppError> {
    let upstream = state.upstream.as_deref().ok_or(AppError::SessionUnavailable)?;

    // Held until the audio URL comes back so turns from concurrent requests don't interleave.
    let guard = state.sessions.lock_turn().await;
    let chat = guard.as_ref().ok_or(AppError::SessionUnavailable)?;

    let turn = upstream.send_message(chat, &build_prompt(mensaje)).await?;
    let candidate = turn.primary_candidate()?;
    let texto = sanitize(&candidate.text);
    tracing::debug!(
        turn_id = %turn.turn_id,
        raw_len = candidate.text.len(),
        clean_len = texto.len(),
        "reply sanitized"
    );

    let voice_id = state
        .voice_id()
        .ok_or_else(|| AppError::Internal("VOICE_ID no configurado".into()))?;
    let audio_url = upstream
        .generate_speech(chat, &turn.turn_id, &candidate.candidate_id, voice_id, &texto)
        .await?;

    Ok(HablarResponse { texto, audio_url })
}
