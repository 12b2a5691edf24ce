// tests/support/mocks/security.rs
use super::auth_provider::{ADMIN_ID, EDITOR_ID, VISITOR_ID};
use super::time::fixed_now;
use async_trait::async_trait;
use chrono::Duration;
use folio_cms::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use folio_cms::domain::user::{Capability, UserId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EDITOR_TOKEN: &str = "editor-token";
pub const VISITOR_TOKEN: &str = "visitor-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Opaque tokens: a few fixed ones for seeded users plus whatever `issue`
/// hands out during a test.
#[derive(Debug, Default)]
pub struct DummyTokenManager {
    issued: Mutex<HashMap<String, AuthenticatedUser>>,
}

fn fixed_user(id: i64, login: &str, group: &str, caps: &[&str]) -> AuthenticatedUser {
    let now = fixed_now();
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        login: login.into(),
        groups: vec![group.into()],
        capabilities: caps
            .iter()
            .map(|c| c.parse::<Capability>().expect("invalid capability"))
            .collect::<HashSet<_>>(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
        session_id: Some(format!("{login}-session")),
    }
}

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let now = fixed_now();
        let ttl = if subject.remember {
            Duration::days(30)
        } else {
            Duration::hours(1)
        };
        let session_id = subject.session_id.clone().unwrap_or_default();
        let token = format!("issued-{}-{session_id}", i64::from(subject.user_id));

        let user = AuthenticatedUser {
            id: subject.user_id,
            login: subject.login,
            groups: subject.groups,
            capabilities: subject.capabilities,
            issued_at: now,
            expires_at: now + ttl,
            session_id: subject.session_id,
        };
        self.issued.lock().unwrap().insert(token.clone(), user);

        Ok(AuthTokenDto {
            token,
            issued_at: now,
            expires_at: now + ttl,
            expires_in: ttl.num_seconds(),
            session_id: Some(session_id),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            ADMIN_TOKEN => Ok(fixed_user(ADMIN_ID, "admin@example.com", "Administrators", &["*:*"])),
            EDITOR_TOKEN => Ok(fixed_user(
                EDITOR_ID,
                "editor@example.com",
                "Editors",
                &["galleries:*", "news:*"],
            )),
            VISITOR_TOKEN => Ok(fixed_user(VISITOR_ID, "visitor@example.com", "Public", &[])),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            other => self
                .issued
                .lock()
                .unwrap()
                .get(other)
                .cloned()
                .ok_or_else(|| ApplicationError::unauthorized("invalid token")),
        }
    }
}
