// src/services/session_manager.rs
use std::{fmt::Debug, sync::Arc};

use tokio::sync::{Mutex, MutexGuard};

use crate::services::character_ai::ChatSession;

/// Owns the single upstream conversation.
///
/// The session is installed once at startup. Relays take the guard from
/// [`SessionManager::lock_turn`] for the whole send-then-speak sequence, so two
/// requests never interleave turns on the same chat.
#[derive(Clone, Default)]
pub struct SessionManager {
    inner: Arc<Mutex<Option<ChatSession>>>,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the session opened at startup, replacing any previous one.
    pub async fn install(&self, session: ChatSession) {
        *self.inner.lock().await = Some(session);
    }

    /// Exclusive access to the session for one relay. Waits behind any relay in flight.
    pub async fn lock_turn(&self) -> MutexGuard<'_, Option<ChatSession>> {
        self.inner.lock().await
    }
}
