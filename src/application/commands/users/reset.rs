use super::{UserCommandService, create::parse_login, password::validate_new_password};
use crate::{
    application::{
        error::ApplicationResult,
        ports::{auth::AuthError, mail::MailMessage},
    },
    domain::user::{User, UserId},
};
use serde_json::json;

pub struct RequestPasswordResetCommand {
    pub login: String,
}

pub struct CheckResetCodeCommand {
    pub user_id: i64,
    pub code: String,
}

pub struct ResetPasswordCommand {
    pub user_id: i64,
    pub code: String,
    pub password: String,
    pub password_confirmation: Option<String>,
}

impl UserCommandService {
    /// Issues a reset code and mails it to the user.
    pub async fn request_password_reset(
        &self,
        command: RequestPasswordResetCommand,
    ) -> ApplicationResult<()> {
        let email = parse_login(&command.login)?;
        let user = self
            .auth
            .find_user_by_login(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let code = self.auth.issue_reset_password_code(user.id).await?;
        self.send_mail(MailMessage {
            template: "auth.reset".into(),
            to: user.email.to_string(),
            subject: format!("{} password reset", self.registration.site_name),
            data: json!({
                "reset_code": code,
                "email": user.email.as_str(),
                "user_id": i64::from(user.id),
            }),
        })
        .await;
        Ok(())
    }

    pub async fn check_reset_code(&self, command: CheckResetCodeCommand) -> ApplicationResult<bool> {
        let user = self.existing_user(command.user_id).await?;
        self.auth
            .check_reset_password_code(user.id, command.code.trim())
            .await
    }

    pub async fn reset_password(&self, command: ResetPasswordCommand) -> ApplicationResult<()> {
        let user = self.existing_user(command.user_id).await?;
        let password =
            validate_new_password(&command.password, command.password_confirmation.as_deref())?;

        if !self
            .auth
            .attempt_reset_password(user.id, command.code.trim(), &password)
            .await?
        {
            return Err(AuthError::InvalidResetCode.into());
        }
        tracing::info!(user_id = command.user_id, "password reset");
        Ok(())
    }

    async fn existing_user(&self, raw_id: i64) -> ApplicationResult<User> {
        let id = UserId::new(raw_id).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .auth
            .find_user_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(user)
    }
}
