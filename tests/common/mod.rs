#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use axum::Router;
use voicechat_backend::config::Config;
use voicechat_backend::routes::create_router;
use voicechat_backend::services::character_ai::{
    Candidate, CharacterApi, ChatSession, Turn, UpstreamError, UpstreamFuture,
};
use voicechat_backend::services::session_manager::SessionManager;
use voicechat_backend::state::AppState;

/// In-memory stand-in for the character service.
#[derive(Default)]
pub struct FakeCharacter {
    pub reply: String,
    pub fail_send: bool,
    pub delay: Duration,
    pub prompts: Mutex<Vec<String>>,
    pub speech_calls: Mutex<Vec<(String, String, String, String)>>,
    pub active_relays: AtomicUsize,
    pub max_active_relays: AtomicUsize,
}

impl FakeCharacter {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_send: true,
            ..Default::default()
        }
    }
}

impl CharacterApi for FakeCharacter {
    fn create_chat<'a>(&'a self, character_id: &'a str) -> UpstreamFuture<'a, ChatSession> {
        Box::pin(async move {
            Ok(ChatSession {
                chat_id: "chat-1".into(),
                character_id: character_id.to_string(),
            })
        })
    }

    fn send_message<'a>(
        &'a self,
        _chat: &'a ChatSession,
        text: &'a str,
    ) -> UpstreamFuture<'a, Turn> {
        Box::pin(async move {
            if self.fail_send {
                return Err(UpstreamError::Protocol("character service exploded".into()));
            }
            let active = self.active_relays.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_active_relays.fetch_max(active, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(text.to_string());
            tokio::time::sleep(self.delay).await;
            Ok(Turn {
                turn_id: "turn-1".into(),
                candidates: vec![
                    Candidate {
                        candidate_id: "cand-0".into(),
                        text: "descartado".into(),
                    },
                    Candidate {
                        candidate_id: "cand-1".into(),
                        text: self.reply.clone(),
                    },
                ],
                primary_candidate_id: Some("cand-1".into()),
            })
        })
    }

    fn generate_speech<'a>(
        &'a self,
        chat: &'a ChatSession,
        turn_id: &'a str,
        candidate_id: &'a str,
        voice_id: &'a str,
        text: &'a str,
    ) -> UpstreamFuture<'a, String> {
        Box::pin(async move {
            tokio::time::sleep(self.delay).await;
            self.speech_calls.lock().unwrap().push((
                turn_id.to_string(),
                candidate_id.to_string(),
                voice_id.to_string(),
                text.to_string(),
            ));
            self.active_relays.fetch_sub(1, Ordering::SeqCst);
            Ok(format!("https://audio.test/{}/{}.mp3", chat.chat_id, turn_id))
        })
    }
}

pub fn test_config() -> Config {
    Config {
        character_token: Some("token".into()),
        character_id: Some("char-1".into()),
        voice_id: Some("voice-1".into()),
        static_dir: std::env::temp_dir().join(format!("voicechat-static-{}", uuid::Uuid::new_v4())),
        ..Config::default()
    }
}

pub fn session() -> ChatSession {
    ChatSession {
        chat_id: "chat-1".into(),
        character_id: "char-1".into(),
    }
}

pub async fn connected_state(fake: Arc<FakeCharacter>, config: Config) -> Arc<AppState> {
    let upstream: Arc<dyn CharacterApi> = fake;
    let sessions = SessionManager::new();
    sessions.install(session()).await;
    Arc::new(AppState::new(config, Some(upstream), sessions))
}

pub async fn disconnected_state(config: Config) -> Arc<AppState> {
    Arc::new(AppState::new(config, None, SessionManager::new()))
}

pub fn app(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();
    create_router(static_dir).with_state(state)
}
