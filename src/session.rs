//! Typed per-user session state and the store it is looked up from.
//!
//! The login flow owns writing sessions; this crate only reads them.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::token::TokenResponse;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub tokens: Option<TokenResponse>,
    #[serde(default)]
    pub user_email: Option<String>,
}

impl SessionContext {
    pub fn signed_in(tokens: TokenResponse, user_email: Option<String>) -> Self {
        Self {
            tokens: Some(tokens),
            user_email,
        }
    }
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<SessionContext>;
}

/// Process-local store for tests and the demo server.
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, SessionContext>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session_id: impl Into<String>, session: SessionContext) {
        self.sessions.write().await.insert(session_id.into(), session);
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<SessionContext> {
        self.sessions.read().await.get(session_id).cloned()
    }
}
