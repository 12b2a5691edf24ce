use super::{
    UserCommandService, capability::ensure_capability, create::parse_login,
    password::validate_new_password,
};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
        ports::auth::AuthError,
    },
    domain::user::{UserId, UserUpdate},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
    pub user_id: i64,
    pub email: Option<String>,
    /// Blank leaves the current password untouched.
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub activated: Option<bool>,
    pub groups: BTreeMap<i64, bool>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        ensure_capability(actor, "users", "update")?;

        let user_id = UserId::new(command.user_id).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .auth
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let mut update = UserUpdate::new(user_id).with_names(
            command.first_name.map(|s| s.trim().to_string()),
            command.last_name.map(|s| s.trim().to_string()),
        );

        if let Some(raw) = command.email.as_deref() {
            let email = parse_login(raw)?;
            if email != user.email {
                self.ensure_login_available(&email).await?;
                update = update.with_email(email);
            }
        }

        if let Some(password) = command
            .password
            .as_deref()
            .filter(|p| !p.trim().is_empty())
        {
            let password =
                validate_new_password(password, command.password_confirmation.as_deref())?;
            update = update.with_password(password);
        }

        if let Some(activated) = command.activated {
            update = update.with_activated(activated);
        }

        let groups = self.resolve_selection(&command.groups).await?;
        self.auth.update_user(update).await?;
        self.sync_groups(&user, &groups).await?;
        let updated = self
            .auth
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        tracing::info!(user_id = command.user_id, by = i64::from(actor.id), "user updated");
        Ok(updated.into())
    }
}
