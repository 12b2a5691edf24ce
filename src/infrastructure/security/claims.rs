// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, UserId};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Rebuilds the authenticated identity from the facts of a verified token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let mut ctx = ClaimsContext::default();
    for fact in facts {
        ctx.apply(&fact.predicate);
    }

    let user_id = ctx
        .user_id
        .ok_or_else(|| ApplicationError::unauthorized("missing user id"))?;
    let login = ctx
        .login
        .ok_or_else(|| ApplicationError::unauthorized("missing login"))?;
    let issued_at = ctx
        .issued_at
        .ok_or_else(|| ApplicationError::unauthorized("missing issued_at"))?;
    let expires_at = ctx
        .expires_at
        .ok_or_else(|| ApplicationError::unauthorized("missing expires_at"))?;

    Ok(AuthenticatedUser {
        id: UserId::new(user_id)?,
        login,
        groups: ctx.groups,
        capabilities: ctx.capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
        session_id: ctx.session_id,
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    login: Option<String>,
    groups: Vec<String>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    session_id: Option<String>,
    capabilities: HashSet<Capability>,
}

fn date(term: Option<&Term>) -> Option<SystemTime> {
    match term {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}

fn string(term: Option<&Term>) -> Option<String> {
    match term {
        Some(Term::Str(value)) => Some(value.clone()),
        _ => None,
    }
}

impl ClaimsContext {
    fn apply(&mut self, predicate: &Predicate) {
        let terms = &predicate.terms;
        match predicate.name.as_str() {
            "user" => {
                if let Some(Term::Integer(id)) = terms.first() {
                    self.user_id = Some(*id);
                }
                self.login = string(terms.get(1));
            }
            "group" => {
                if let Some(name) = string(terms.first()) {
                    self.groups.push(name);
                }
            }
            "right" => {
                if let (Some(resource), Some(action)) = (string(terms.first()), string(terms.get(1))) {
                    self.capabilities.insert(Capability::new(resource, action));
                }
            }
            "issued_at" => self.issued_at = date(terms.first()),
            "expires_at" => self.expires_at = date(terms.first()),
            "session" => self.session_id = string(terms.first()),
            _ => {}
        }
    }
}
