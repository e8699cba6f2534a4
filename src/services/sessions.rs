//! Patron login sessions
//!
//! Each successful login owns a slot keyed by an opaque token. A request
//! presenting a live token acts as that patron; a request without one is
//! logged out. Sessions live in process memory only and expire after the
//! configured lifetime.

use std::{collections::HashMap, sync::Arc};

use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
    models::Session,
    repository::Repository,
};

#[derive(Clone)]
pub struct SessionService {
    repository: Repository,
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionService {
    pub fn new(repository: Repository, config: &SessionConfig) -> Self {
        let ttl = Duration::hours(config.ttl_hours.min(i32::MAX as u64) as i64);

        Self {
            repository,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Log a patron in by exact name and card number.
    ///
    /// Returns `None` when no such patron exists; existing sessions are left
    /// untouched in that case. When `existing` names a live session it is
    /// overwritten in place, otherwise a new token is issued.
    pub async fn login(
        &self,
        name: &str,
        card_num: i64,
        existing: Option<Uuid>,
    ) -> AppResult<Option<Session>> {
        // Card numbers are unsigned, so a negative one can never match
        let Ok(card_num) = u32::try_from(card_num) else {
            tracing::info!("Login rejected for {}: card number {} out of range", name, card_num);
            return Ok(None);
        };

        if !self.repository.patron_exists(name, card_num).await? {
            tracing::info!("Login rejected for {} (card {})", name, card_num);
            return Ok(None);
        }

        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(self.ttl, now));
        if sessions.len() < before {
            tracing::debug!("Evicted {} expired sessions", before - sessions.len());
        }

        let token = existing
            .filter(|token| sessions.contains_key(token))
            .unwrap_or_else(Uuid::new_v4);

        let session = Session::new(token, name, card_num);
        sessions.insert(token, session.clone());

        tracing::info!("Patron {} (card {}) logged in", name, card_num);
        Ok(Some(session))
    }

    /// Drop the session for the token, if there is one
    pub async fn logout(&self, token: Option<Uuid>) {
        let Some(token) = token else {
            return;
        };

        if let Some(session) = self.sessions.write().await.remove(&token) {
            tracing::info!("Patron {} (card {}) logged out", session.name, session.card_num);
        }
    }

    /// Resolve a token to its live session
    pub async fn current(&self, token: Uuid) -> AppResult<Session> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&token) {
                Some(session) if !session.is_expired(self.ttl, now) => return Ok(session.clone()),
                Some(_) => {}
                None => return Err(AppError::Authentication("Not logged in".to_string())),
            }
        }

        let mut sessions = self.sessions.write().await;
        if let Some(expired) = sessions.remove(&token) {
            tracing::debug!("Session for card {} expired", expired.card_num);
        }
        Err(AppError::Authentication("Session expired".to_string()))
    }
}
