//! Client for the character-chat service.
//!
//! The relay only needs three things from upstream: open one chat with a
//! character, send a turn into it, and ask for a spoken rendition of a reply.
//! [`CharacterApi`] is that surface; [`CharacterAiClient`] implements it over
//! HTTP with `reqwest`.

use std::{future::Future, pin::Pin};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

pub type UpstreamFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, UpstreamError>> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected upstream response: {0}")]
    Protocol(String),
}

/// Handle to the single upstream conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatSession {
    pub chat_id: String,
    pub character_id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub candidate_id: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub turn_id: String,
    pub candidates: Vec<Candidate>,
    pub primary_candidate_id: Option<String>,
}

impl Turn {
    /// The candidate upstream picked as its answer, or the first one if it did not say.
    pub fn primary_candidate(&self) -> Result<&Candidate, UpstreamError> {
        let primary = self.primary_candidate_id.as_deref().and_then(|id| {
            self.candidates.iter().find(|c| c.candidate_id == id)
        });
        primary
            .or_else(|| self.candidates.first())
            .ok_or_else(|| {
                UpstreamError::Protocol(format!("turn {} has no candidates", self.turn_id))
            })
    }
}

pub trait CharacterApi: Send + Sync {
    fn create_chat<'a>(&'a self, character_id: &'a str) -> UpstreamFuture<'a, ChatSession>;

    fn send_message<'a>(&'a self, chat: &'a ChatSession, text: &'a str) -> UpstreamFuture<'a, Turn>;

    /// Returns a URL to the synthesized audio, never the audio itself.
    fn generate_speech<'a>(
        &'a self,
        chat: &'a ChatSession,
        turn_id: &'a str,
        candidate_id: &'a str,
        voice_id: &'a str,
        text: &'a str,
    ) -> UpstreamFuture<'a, String>;
}

#[derive(Clone, Debug)]
pub struct UpstreamUrls {
    pub api: String,
    pub account: String,
}

#[derive(Clone, Debug)]
pub struct CharacterAiClient {
    http: Client,
    urls: UpstreamUrls,
    token: String,
    account_id: String,
}

// Wire shapes

#[derive(Deserialize)]
struct AccountEnvelope {
    user: AccountUser,
}

#[derive(Deserialize)]
struct AccountUser {
    user: Option<AccountInner>,
}

#[derive(Deserialize)]
struct AccountInner {
    id: serde_json::Value,
}

#[derive(Deserialize)]
struct ChatEnvelope {
    chat: WireChat,
}

#[derive(Deserialize)]
struct WireChat {
    chat_id: String,
}

#[derive(Deserialize)]
struct TurnEnvelope {
    turn: WireTurn,
}

#[derive(Deserialize)]
struct WireTurn {
    turn_key: WireTurnKey,
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    primary_candidate_id: Option<String>,
}

#[derive(Deserialize)]
struct WireTurnKey {
    turn_id: String,
}

#[derive(Deserialize)]
struct WireCandidate {
    candidate_id: String,
    #[serde(default)]
    raw_content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayRequest<'a> {
    candidate_id: &'a str,
    room_id: &'a str,
    turn_id: &'a str,
    voice_id: &'a str,
    voice_text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplayResponse {
    replay_url: Option<String>,
}

impl From<WireTurn> for Turn {
    fn from(wire: WireTurn) -> Self {
        Self {
            turn_id: wire.turn_key.turn_id,
            candidates: wire
                .candidates
                .into_iter()
                .map(|c| Candidate {
                    candidate_id: c.candidate_id,
                    text: c.raw_content,
                })
                .collect(),
            primary_candidate_id: wire.primary_candidate_id,
        }
    }
}

async fn check(res: reqwest::Response) -> Result<reqwest::Response, UpstreamError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(UpstreamError::Status { status, body })
}

impl CharacterAiClient {
    /// Authenticate with `token` and return a client bound to that account.
    pub async fn connect(
        http: Client,
        urls: UpstreamUrls,
        token: &str,
    ) -> Result<Self, UpstreamError> {
        let res = http
            .get(format!("{}/chat/user/", urls.account))
            .header("Authorization", format!("Token {token}"))
            .send()
            .await?;

        let res = match check(res).await {
            Ok(res) => res,
            Err(UpstreamError::Status { status, .. }) => {
                return Err(UpstreamError::Auth(format!("account lookup returned {status}")));
            }
            Err(e) => return Err(e),
        };

        let envelope: AccountEnvelope = res
            .json()
            .await
            .map_err(|e| UpstreamError::Auth(format!("unreadable account payload: {e}")))?;
        let account_id = match envelope.user.user.map(|u| u.id) {
            Some(serde_json::Value::Number(n)) => n.to_string(),
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            _ => return Err(UpstreamError::Auth("token did not resolve to an account".into())),
        };

        tracing::debug!(%account_id, "authenticated with character service");
        Ok(Self {
            http,
            urls,
            token: token.to_string(),
            account_id,
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .post(format!("{}{}", self.urls.api, path))
            .header("Authorization", format!("Token {}", self.token))
    }
}

impl CharacterApi for CharacterAiClient {
    fn create_chat<'a>(&'a self, character_id: &'a str) -> UpstreamFuture<'a, ChatSession> {
        Box::pin(async move {
            let chat_id = Uuid::new_v4().to_string();
            let res = self
                .post("/chats/")
                .json(&json!({
                    "chat_id": chat_id,
                    "character_id": character_id,
                    "creator_id": self.account_id,
                    "with_greeting": false,
                }))
                .send()
                .await?;
            let envelope: ChatEnvelope = check(res).await?.json().await?;

            Ok(ChatSession {
                chat_id: envelope.chat.chat_id,
                character_id: character_id.to_string(),
            })
        })
    }

    fn send_message<'a>(
        &'a self,
        chat: &'a ChatSession,
        text: &'a str,
    ) -> UpstreamFuture<'a, Turn> {
        Box::pin(async move {
            let res = self
                // Placeholder JSON route; the hosted service speaks a streaming protocol here.
                .post(&format!("/chats/{}/turns", chat.chat_id))
                .json(&json!({
                    "request_id": Uuid::new_v4().to_string(),
                    "character_id": chat.character_id,
                    "turn_id": Uuid::new_v4().to_string(),
                    "author_id": self.account_id,
                    "text": text,
                }))
                .send()
                .await?;
            let envelope: TurnEnvelope = check(res).await?.json().await?;
            Ok(envelope.turn.into())
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
            let res = self
                .post("/multimodal/api/v1/memo/replay")
                .json(&ReplayRequest {
                    candidate_id,
                    room_id: &chat.chat_id,
                    turn_id,
                    voice_id,
                    voice_text: text,
                })
                .send()
                .await?;
            let replay: ReplayResponse = check(res).await?.json().await?;

            replay
                .replay_url
                .filter(|u| !u.is_empty())
                .ok_or_else(|| {
                    UpstreamError::Protocol("speech response carried no replay URL".into())
                })
        })
    }
}
