use super::{UserCommandService, capability::ensure_capability, password::validate_new_password};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
        ports::auth::AuthError,
    },
    domain::user::{Email, NewUser},
};
use std::collections::BTreeMap;

/// Admin form for a new user. `groups` maps group ids to membership.
#[derive(Debug, Clone, Default)]
pub struct CreateUserCommand {
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub activated: bool,
    pub groups: BTreeMap<i64, bool>,
}

impl UserCommandService {
    pub async fn create_user(
        &self,
        actor: &AuthenticatedUser,
        command: CreateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "create")?;

        let email = parse_login(&command.email)?;
        let password =
            validate_new_password(&command.password, command.password_confirmation.as_deref())?;
        self.ensure_login_available(&email).await?;
        let groups = self.resolve_selection(&command.groups).await?;

        let user = self
            .auth
            .create_user(NewUser {
                email,
                password,
                first_name: command.first_name.trim().to_string(),
                last_name: command.last_name.trim().to_string(),
                activated: command.activated,
            })
            .await?;
        self.sync_groups(&user, &groups).await?;

        let user = self
            .auth
            .find_user_by_id(user.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        tracing::info!(user_id = i64::from(user.id), by = i64::from(actor.id), "user created");
        Ok(user.into())
    }

    pub(super) async fn ensure_login_available(&self, email: &Email) -> ApplicationResult<()> {
        if self.auth.find_user_by_login(email).await?.is_some() {
            return Err(AuthError::UserExists.into());
        }
        Ok(())
    }
}

/// A blank login is reported as [`AuthError::LoginRequired`].
pub(super) fn parse_login(raw: &str) -> ApplicationResult<Email> {
    if raw.trim().is_empty() {
        return Err(AuthError::LoginRequired.into());
    }
    Email::new(raw).map_err(ApplicationError::from)
}
