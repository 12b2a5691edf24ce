// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    fmt::Write as _,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Issues Ed25519-signed biscuit tokens carrying the user's identity,
/// groups and capabilities.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
    remember_ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(
        private_key_hex: &str,
        ttl: Duration,
        remember_ttl: Duration,
    ) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;
        let keypair = KeyPair::from(&private);
        let public = keypair.public();

        Ok(Self {
            root: Arc::new(keypair),
            public,
            ttl,
            remember_ttl: remember_ttl.max(ttl),
        })
    }

    fn ttl_for(&self, subject: &TokenSubject) -> Duration {
        if subject.remember {
            self.remember_ttl
        } else {
            self.ttl
        }
    }
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn build_code_and_params(
    subject: &TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
) -> (String, HashMap<String, Term>) {
    let mut params: HashMap<String, Term> = HashMap::new();
    params.insert("uid".to_string(), i64::from(subject.user_id).into());
    params.insert("ulogin".to_string(), subject.login.clone().into());
    params.insert("issued".to_string(), issued_at.into());
    params.insert("exp".to_string(), expires_at.into());

    let mut code = String::from(
        r"
        user({uid}, {ulogin});
        issued_at({issued});
        expires_at({exp});
        check if time($now), $now >= {issued};
        check if time($now), $now <= {exp};
        ",
    );

    if let Some(sid) = subject.session_id.as_ref() {
        code.push_str("session({sid});\n");
        params.insert("sid".to_string(), sid.clone().into());
    }

    for group in &subject.groups {
        let _ = writeln!(code, r#"group("{}");"#, escape(group));
    }

    for cap in &subject.capabilities {
        let _ = writeln!(
            code,
            r#"right("{}", "{}");"#,
            escape(&cap.resource),
            escape(&cap.action)
        );
    }

    (code, params)
}

fn build_and_serialize_biscuit(
    code: &str,
    params: HashMap<String, Term>,
    root: &KeyPair,
) -> Result<String, ApplicationError> {
    let builder = Biscuit::builder()
        .code_with_params(code, params, HashMap::new())
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    let token = builder
        .build(root)
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?;

    token
        .seal()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
        .to_base64()
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let ttl = self.ttl_for(&subject);
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;
        let (code, params) = build_code_and_params(&subject, issued_at, expires_at);

        let serialized = build_and_serialize_biscuit(&code, params, self.root.as_ref())?;

        Ok(AuthTokenDto {
            token: serialized,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            session_id: subject.session_id,
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let biscuit = Biscuit::from_base64(token, self.public)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        // Enforces the expiry checks embedded in the token.
        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .code("allow if true;")
            .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
            .build(&biscuit)
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        authorizer
            .authorize()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;

        let view = biscuit
            .authorizer()
            .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
        let (facts, _, _, _) = view.dump();

        super::claims::parse_claims(facts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Capability, UserId};

    const KEY: &str = "c2b7507bf4510fb6b7a7e3ae81b8d7c7b8d8a5f8b1e7d1c2a4f6e8d0b2c4e6f8";

    fn subject(remember: bool) -> TokenSubject {
        TokenSubject {
            user_id: UserId::new(42).unwrap(),
            login: "editor@example.com".into(),
            groups: vec!["Editors".into()],
            capabilities: [Capability::new("news", "*")].into_iter().collect(),
            session_id: Some("session-1".into()),
            remember,
        }
    }

    #[tokio::test]
    async fn issued_token_round_trips_identity() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(60), Duration::from_secs(600))
            .unwrap();
        let token = manager.issue(subject(false)).await.unwrap();
        assert_eq!(token.expires_in, 60);

        let user = manager.authenticate(&token.token).await.unwrap();
        assert_eq!(i64::from(user.id), 42);
        assert_eq!(user.login, "editor@example.com");
        assert_eq!(user.groups, vec!["Editors".to_string()]);
        assert!(user.has_capability("news", "create"));
        assert!(!user.has_capability("galleries", "create"));
        assert_eq!(user.session_id.as_deref(), Some("session-1"));
    }

    #[tokio::test]
    async fn remember_uses_the_longer_lifetime() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(60), Duration::from_secs(600))
            .unwrap();
        let token = manager.issue(subject(true)).await.unwrap();
        assert_eq!(token.expires_in, 600);
    }

    #[tokio::test]
    async fn garbage_is_unauthorized() {
        let manager = BiscuitTokenManager::new(KEY, Duration::from_secs(60), Duration::from_secs(600))
            .unwrap();
        let err = manager.authenticate("not-a-token").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
