//! Patron session model

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A logged-in patron, keyed by an opaque token handed out at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Session {
    #[serde(skip)]
    pub token: Uuid,
    pub name: String,
    pub card_num: u32,
    pub logged_in_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: Uuid, name: impl Into<String>, card_num: u32) -> Self {
        Self {
            token,
            name: name.into(),
            card_num,
            logged_in_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.logged_in_at
            .checked_add_signed(ttl)
            .is_some_and(|deadline| now >= deadline)
    }
}
