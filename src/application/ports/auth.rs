// src/application/ports/auth.rs
use crate::application::ApplicationResult;
use crate::domain::user::{
    Email, Group, GroupId, NewUser, PlainPassword, ThrottleStatus, User, UserId, UserUpdate,
};
use async_trait::async_trait;
use thiserror::Error;

/// Typed failure kinds of the auth provider. `Display` is the message shown
/// to the user, `code()` a stable identifier for clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Login field is required.")]
    LoginRequired,
    #[error("Password field is required.")]
    PasswordRequired,
    #[error("User with this login already exists.")]
    UserExists,
    #[error("User not found.")]
    UserNotFound,
    #[error("You have already activated this account.")]
    UserAlreadyActivated,
    #[error("Group not found.")]
    GroupNotFound,
    #[error("Wrong password, try again.")]
    WrongPassword,
    #[error("User not activated.")]
    UserNotActivated,
    #[error("User is suspended for {minutes} minutes.")]
    UserSuspended { minutes: i64 },
    #[error("User is banned.")]
    UserBanned,
    #[error("There was a problem activating this account.")]
    ActivationFailed,
    #[error("The password reset code is invalid.")]
    InvalidResetCode,
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::LoginRequired => "login_required",
            Self::PasswordRequired => "password_required",
            Self::UserExists => "user_exists",
            Self::UserNotFound => "user_not_found",
            Self::UserAlreadyActivated => "user_already_activated",
            Self::GroupNotFound => "group_not_found",
            Self::WrongPassword => "wrong_password",
            Self::UserNotActivated => "user_not_activated",
            Self::UserSuspended { .. } => "user_suspended",
            Self::UserBanned => "user_banned",
            Self::ActivationFailed => "activation_failed",
            Self::InvalidResetCode => "invalid_reset_code",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: String,
    pub password: PlainPassword,
}

impl Credentials {
    /// Blank login or password are rejected before the provider is consulted.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.login.trim().is_empty() {
            return Err(AuthError::LoginRequired);
        }
        if self.password.is_blank() {
            return Err(AuthError::PasswordRequired);
        }
        Ok(())
    }
}

/// The identity collaborator: users, groups, credentials, activation and
/// reset codes, throttling.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verifies credentials, applying throttling, and records the login.
    async fn authenticate(&self, credentials: &Credentials) -> ApplicationResult<User>;

    async fn create_user(&self, user: NewUser) -> ApplicationResult<User>;
    async fn update_user(&self, update: UserUpdate) -> ApplicationResult<User>;
    async fn delete_user(&self, id: UserId) -> ApplicationResult<bool>;

    async fn find_user_by_id(&self, id: UserId) -> ApplicationResult<Option<User>>;
    async fn find_user_by_login(&self, login: &Email) -> ApplicationResult<Option<User>>;
    async fn find_all_users(&self) -> ApplicationResult<Vec<User>>;

    async fn find_all_groups(&self) -> ApplicationResult<Vec<Group>>;
    async fn find_group_by_id(&self, id: GroupId) -> ApplicationResult<Option<Group>>;
    async fn add_user_to_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()>;
    async fn remove_user_from_group(&self, user: UserId, group: GroupId) -> ApplicationResult<()>;

    /// Returns the cleartext code; only a digest is stored.
    async fn issue_activation_code(&self, user: UserId) -> ApplicationResult<String>;
    async fn attempt_activation(&self, user: UserId, code: &str) -> ApplicationResult<bool>;

    async fn issue_reset_password_code(&self, user: UserId) -> ApplicationResult<String>;
    async fn check_reset_password_code(&self, user: UserId, code: &str) -> ApplicationResult<bool>;
    async fn attempt_reset_password(
        &self,
        user: UserId,
        code: &str,
        password: &PlainPassword,
    ) -> ApplicationResult<bool>;

    async fn throttle_status(&self, user: UserId) -> ApplicationResult<ThrottleStatus>;
}
