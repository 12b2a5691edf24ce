use super::{UserQueryService, list::ensure_can_read};
use crate::{
    application::{
        dto::{AuthenticatedUser, GroupDto, GroupSelectionDto},
        error::ApplicationResult,
        ports::auth::AuthError,
    },
    domain::user::UserId,
};

impl UserQueryService {
    pub async fn list_groups(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<GroupDto>> {
        ensure_can_read(actor)?;
        let groups = self.auth.find_all_groups().await?;
        Ok(groups.into_iter().map(Into::into).collect())
    }

    /// Groups as offered on a user form. With `user_id`, each entry says
    /// whether that user is a member.
    pub async fn group_selection(
        &self,
        actor: &AuthenticatedUser,
        user_id: Option<i64>,
    ) -> ApplicationResult<Vec<GroupSelectionDto>> {
        ensure_can_read(actor)?;

        let user = match user_id {
            Some(raw) => {
                let id = UserId::new(raw).map_err(|_| AuthError::UserNotFound)?;
                Some(
                    self.auth
                        .find_user_by_id(id)
                        .await?
                        .ok_or(AuthError::UserNotFound)?,
                )
            }
            None => None,
        };

        let groups = self.auth.find_all_groups().await?;
        Ok(groups
            .iter()
            .map(|group| {
                let selected = user.as_ref().map(|u| u.in_group(group.id));
                GroupSelectionDto::new(group, selected)
            })
            .collect())
    }
}
