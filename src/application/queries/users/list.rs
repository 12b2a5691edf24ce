use super::UserQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{User, UserStatus},
};

impl UserQueryService {
    /// Every user, each annotated with its current status.
    pub async fn list_users(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<UserDto>> {
        ensure_can_read(actor)?;

        let users = self.auth.find_all_users().await?;
        let mut items = Vec::with_capacity(users.len());
        for user in users {
            items.push(self.with_status(user).await?);
        }
        Ok(items)
    }

    pub(super) async fn with_status(&self, user: User) -> ApplicationResult<UserDto> {
        let throttle = self.auth.throttle_status(user.id).await?;
        let status = UserStatus::evaluate(user.activated, &throttle, self.clock.now());
        Ok(UserDto::from(user).with_status(status))
    }
}

pub(super) fn ensure_can_read(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if actor.has_capability("users", "read") {
        Ok(())
    } else {
        Err(ApplicationError::forbidden("missing capability users:read"))
    }
}
