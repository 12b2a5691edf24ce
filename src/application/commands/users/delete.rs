use super::{UserCommandService, capability::ensure_capability};
use crate::{
    application::{dto::AuthenticatedUser, error::ApplicationResult},
    domain::user::UserId,
};

impl UserCommandService {
    /// Returns whether a user was removed.
    pub async fn destroy_user(&self, actor: &AuthenticatedUser, user_id: i64) -> ApplicationResult<bool> {
        ensure_capability(actor, "users", "delete")?;

        let Ok(id) = UserId::new(user_id) else {
            return Ok(false);
        };
        let deleted = self.auth.delete_user(id).await?;
        if deleted {
            tracing::info!(user_id, by = i64::from(actor.id), "user deleted");
        }
        Ok(deleted)
    }
}
