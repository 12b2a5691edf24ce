use super::UserCommandService;
use crate::{
    application::{dto::UserDto, error::ApplicationResult, ports::auth::AuthError},
    domain::user::UserId,
};

pub struct ActivateUserCommand {
    pub user_id: i64,
    pub code: String,
}

impl UserCommandService {
    pub async fn activate(&self, command: ActivateUserCommand) -> ApplicationResult<UserDto> {
        let user_id = UserId::new(command.user_id).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .auth
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.activated {
            return Err(AuthError::UserAlreadyActivated.into());
        }
        if !self.auth.attempt_activation(user_id, command.code.trim()).await? {
            tracing::warn!(user_id = command.user_id, "activation attempt with a wrong code");
            return Err(AuthError::ActivationFailed.into());
        }

        self.add_to_default_group(&user).await?;
        let user = self
            .auth
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        tracing::info!(user_id = command.user_id, "user activated");
        Ok(user.into())
    }
}
