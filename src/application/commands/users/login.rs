use super::UserCommandService;
use crate::{
    application::{
        dto::{AuthTokenDto, AuthenticatedUser, TokenSubject, UserDto},
        error::ApplicationResult,
        ports::auth::Credentials,
    },
    domain::user::PlainPassword,
};
use uuid::Uuid;

pub struct LoginUserCommand {
    pub login: String,
    pub password: String,
    pub remember: bool,
}

pub struct LoginResult {
    pub token: AuthTokenDto,
    pub user: UserDto,
}

impl UserCommandService {
    pub async fn login(&self, command: LoginUserCommand) -> ApplicationResult<LoginResult> {
        let credentials = Credentials {
            login: command.login.trim().to_string(),
            password: PlainPassword::new(command.password),
        };
        credentials.validate()?;

        let user = self.auth.authenticate(&credentials).await?;

        let session_id = Uuid::new_v4().to_string();
        let subject = TokenSubject::for_user(&user, session_id, command.remember);
        let token = self.token_manager.issue(subject).await?;

        tracing::info!(user_id = i64::from(user.id), remember = command.remember, "user logged in");
        Ok(LoginResult {
            token,
            user: user.into(),
        })
    }

    /// Revokes the session the caller's token belongs to.
    pub async fn logout(&self, actor: &AuthenticatedUser) -> ApplicationResult<()> {
        if let Some(session_id) = &actor.session_id {
            self.session_revocation_store.revoke(session_id).await?;
        }
        tracing::info!(user_id = i64::from(actor.id), "user logged out");
        Ok(())
    }
}
