// src/domain/user/throttle.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Failed-login bookkeeping for a single user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThrottleStatus {
    pub attempts: u32,
    pub suspended_until: Option<DateTime<Utc>>,
    pub banned: bool,
}

impl ThrottleStatus {
    pub fn is_suspended(&self, now: DateTime<Utc>) -> bool {
        self.suspended_until.is_some_and(|until| until > now)
    }

    /// Whole minutes left on the suspension, rounded up. Zero when not suspended.
    pub fn remaining_minutes(&self, now: DateTime<Utc>) -> i64 {
        match self.suspended_until {
            Some(until) if until > now => {
                let seconds = (until - now).num_seconds();
                (seconds + 59) / 60
            }
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum UserStatus {
    #[serde(rename = "Active")]
    Active,
    #[serde(rename = "Not Active")]
    NotActive,
    #[serde(rename = "Suspended")]
    Suspended,
    #[serde(rename = "Banned")]
    Banned,
}

impl UserStatus {
    /// Banned outranks suspended, which outranks the activation flag.
    pub fn evaluate(activated: bool, throttle: &ThrottleStatus, now: DateTime<Utc>) -> Self {
        if throttle.banned {
            Self::Banned
        } else if throttle.is_suspended(now) {
            Self::Suspended
        } else if activated {
            Self::Active
        } else {
            Self::NotActive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::NotActive => "Not Active",
            Self::Suspended => "Suspended",
            Self::Banned => "Banned",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn banned_wins_over_everything() {
        let throttle = ThrottleStatus {
            attempts: 9,
            suspended_until: Some(now() + Duration::minutes(5)),
            banned: true,
        };
        assert_eq!(UserStatus::evaluate(true, &throttle, now()), UserStatus::Banned);
    }

    #[test]
    fn suspended_wins_over_activation() {
        let throttle = ThrottleStatus {
            attempts: 5,
            suspended_until: Some(now() + Duration::minutes(5)),
            banned: false,
        };
        assert_eq!(UserStatus::evaluate(true, &throttle, now()), UserStatus::Suspended);
        assert_eq!(UserStatus::evaluate(false, &throttle, now()), UserStatus::Suspended);
    }

    #[test]
    fn expired_suspension_falls_back_to_activation() {
        let throttle = ThrottleStatus {
            attempts: 5,
            suspended_until: Some(now() - Duration::seconds(1)),
            banned: false,
        };
        assert_eq!(UserStatus::evaluate(true, &throttle, now()), UserStatus::Active);
        assert_eq!(UserStatus::evaluate(false, &throttle, now()), UserStatus::NotActive);
        assert_eq!(UserStatus::NotActive.to_string(), "Not Active");
    }

    #[test]
    fn remaining_minutes_rounds_up() {
        let throttle = ThrottleStatus {
            attempts: 5,
            suspended_until: Some(now() + Duration::seconds(61)),
            banned: false,
        };
        assert_eq!(throttle.remaining_minutes(now()), 2);
        assert_eq!(ThrottleStatus::default().remaining_minutes(now()), 0);
    }
}
