// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::character_ai::{CharacterAiClient, CharacterApi, ChatSession, UpstreamUrls};
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub upstream: Option<Arc<dyn CharacterApi>>,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(
        config: Config,
        upstream: Option<Arc<dyn CharacterApi>>,
        sessions: SessionManager,
    ) -> Self {
        Self {
            config,
            upstream,
            sessions,
        }
    }

    /// Authenticate and open the one chat every request will share.
    ///
    /// Failures are logged and leave the state without a session; the server
    /// still starts and relays answer 500 until the process is restarted.
    pub async fn connect(config: Config) -> Self {
        let sessions = SessionManager::new();
        match open_session(&config).await {
            Ok((client, session)) => {
                tracing::info!(
                    account_id = client.account_id(),
                    chat_id = %session.chat_id,
                    "🚀 servidor online, modo solo conversación"
                );
                sessions.install(session).await;
                let upstream: Arc<dyn CharacterApi> = Arc::new(client);
                Self::new(config, Some(upstream), sessions)
            }
            Err(err) => {
                tracing::error!(error = %err, "❌ error conectando al servicio de personajes");
                Self::new(config, None, sessions)
            }
        }
    }

    pub fn voice_id(&self) -> Option<&str> {
        self.config.voice_id.as_deref()
    }
}

async fn open_session(config: &Config) -> Result<(CharacterAiClient, ChatSession), AppError> {
    let creds = config.credentials()?;
    let http = reqwest::Client::builder()
        .timeout(config.upstream_timeout)
        .build()
        .map_err(|e| AppError::Internal(format!("http client: {e}")))?;
    let urls = UpstreamUrls {
        api: config.api_url.clone(),
        account: config.account_url.clone(),
    };

    let client = CharacterAiClient::connect(http, urls, &creds.token).await?;
    let session = client.create_chat(&creds.character_id).await?;
    Ok((client, session))
}
