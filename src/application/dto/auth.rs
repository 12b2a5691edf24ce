use crate::domain::user::{Capability, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthTokenDto {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub expires_in: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

/// Identity recovered from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub login: String,
    pub groups: Vec<String>,
    pub capabilities: HashSet<Capability>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub session_id: Option<String>,
}

impl AuthenticatedUser {
    pub fn has_capability(&self, resource: &str, action: &str) -> bool {
        self.capabilities
            .iter()
            .any(|cap| cap.matches(resource, action))
    }
}

#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub user_id: UserId,
    pub login: String,
    pub groups: Vec<String>,
    pub capabilities: HashSet<Capability>,
    pub session_id: Option<String>,
    /// Issue with the long "remember me" lifetime.
    pub remember: bool,
}

impl TokenSubject {
    pub fn for_user(user: &User, session_id: String, remember: bool) -> Self {
        Self {
            user_id: user.id,
            login: user.email.to_string(),
            groups: user.group_names(),
            capabilities: user.capabilities(),
            session_id: Some(session_id),
            remember,
        }
    }
}
