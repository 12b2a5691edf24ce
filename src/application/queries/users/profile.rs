use super::UserQueryService;
use crate::application::{
    dto::{AuthenticatedUser, UserProfileDto},
    error::ApplicationResult,
    ports::auth::AuthError,
};

impl UserQueryService {
    pub async fn get_profile(
        &self,
        actor: &AuthenticatedUser,
    ) -> ApplicationResult<UserProfileDto> {
        let user = self
            .auth
            .find_user_by_id(actor.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(UserProfileDto::from_parts(user, actor, self.clock.now()))
    }
}
