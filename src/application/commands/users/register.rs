use super::{UserCommandService, create::parse_login, password::validate_new_password};
use crate::{
    application::{
        dto::UserDto,
        error::ApplicationResult,
        ports::{auth::AuthError, mail::MailMessage},
    },
    domain::user::NewUser,
};
use serde_json::json;

pub struct RegisterUserCommand {
    pub email: String,
    pub password: String,
    pub password_confirmation: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug)]
pub struct RegisterResult {
    pub user: UserDto,
    /// The account stays inactive until the mailed code is redeemed.
    pub activation_required: bool,
}

impl UserCommandService {
    /// Self-service sign-up, confirmed by mail unless registration is
    /// configured to skip confirmation.
    pub async fn register(&self, command: RegisterUserCommand) -> ApplicationResult<RegisterResult> {
        let no_confirmation = !self.registration.requires_confirmation;
        self.register_user(command, no_confirmation).await
    }

    pub async fn register_user(
        &self,
        command: RegisterUserCommand,
        no_confirmation: bool,
    ) -> ApplicationResult<RegisterResult> {
        let email = parse_login(&command.email)?;
        let password =
            validate_new_password(&command.password, command.password_confirmation.as_deref())?;
        self.ensure_login_available(&email).await?;

        let user = self
            .auth
            .create_user(NewUser {
                email,
                password,
                first_name: command.first_name.trim().to_string(),
                last_name: command.last_name.trim().to_string(),
                activated: no_confirmation,
            })
            .await?;

        if no_confirmation {
            self.add_to_default_group(&user).await?;
            let user = self
                .auth
                .find_user_by_id(user.id)
                .await?
                .ok_or(AuthError::UserNotFound)?;
            tracing::info!(user_id = i64::from(user.id), "user registered without confirmation");
            return Ok(RegisterResult {
                user: user.into(),
                activation_required: false,
            });
        }

        let code = self.auth.issue_activation_code(user.id).await?;
        self.send_mail(MailMessage {
            template: "auth.welcome".into(),
            to: user.email.to_string(),
            subject: format!("Welcome to {}", self.registration.site_name),
            data: json!({
                "activation_code": code,
                "email": user.email.as_str(),
                "first_name": user.first_name,
                "last_name": user.last_name,
                "user_id": i64::from(user.id),
            }),
        })
        .await;

        tracing::info!(user_id = i64::from(user.id), "user registered, activation pending");
        Ok(RegisterResult {
            user: user.into(),
            activation_required: true,
        })
    }
}
