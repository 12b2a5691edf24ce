use super::{UserQueryService, list::ensure_can_read};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::ApplicationResult,
        ports::auth::AuthError,
    },
    domain::user::{Email, UserId},
};

impl UserQueryService {
    pub async fn get_user(
        &self,
        actor: &AuthenticatedUser,
        user_id: i64,
    ) -> ApplicationResult<UserDto> {
        ensure_can_read(actor)?;

        let id = UserId::new(user_id).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .auth
            .find_user_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        self.with_status(user).await
    }

    pub async fn find_by_login(
        &self,
        actor: &AuthenticatedUser,
        login: &str,
    ) -> ApplicationResult<UserDto> {
        ensure_can_read(actor)?;

        if login.trim().is_empty() {
            return Err(AuthError::LoginRequired.into());
        }
        let email = Email::new(login).map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .auth
            .find_user_by_login(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        self.with_status(user).await
    }
}
