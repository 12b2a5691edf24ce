use super::UserCommandService;
use crate::{
    application::{error::ApplicationResult, ports::auth::AuthError},
    domain::user::{GroupId, User},
};
use std::collections::BTreeMap;

impl UserCommandService {
    /// Resolves every id of a group selection, failing on the first unknown
    /// one. Called before any write.
    pub(super) async fn resolve_selection(
        &self,
        selection: &BTreeMap<i64, bool>,
    ) -> ApplicationResult<Vec<(GroupId, bool)>> {
        let mut resolved = Vec::with_capacity(selection.len());
        for (&raw_id, &selected) in selection {
            let group_id = GroupId::new(raw_id).map_err(|_| AuthError::GroupNotFound)?;
            if self.auth.find_group_by_id(group_id).await?.is_none() {
                return Err(AuthError::GroupNotFound.into());
            }
            resolved.push((group_id, selected));
        }
        Ok(resolved)
    }

    /// Applies a resolved selection to the user's memberships. Groups not in
    /// the selection are left alone.
    pub(super) async fn sync_groups(
        &self,
        user: &User,
        selection: &[(GroupId, bool)],
    ) -> ApplicationResult<()> {
        for &(group_id, selected) in selection {
            match (selected, user.in_group(group_id)) {
                (true, false) => self.auth.add_user_to_group(user.id, group_id).await?,
                (false, true) => self.auth.remove_user_from_group(user.id, group_id).await?,
                _ => {}
            }
        }
        Ok(())
    }

    pub(super) async fn add_to_default_group(&self, user: &User) -> ApplicationResult<()> {
        let group_id = self.registration.default_group;
        if self.auth.find_group_by_id(group_id).await?.is_none() {
            return Err(AuthError::GroupNotFound.into());
        }
        if !user.in_group(group_id) {
            self.auth.add_user_to_group(user.id, group_id).await?;
        }
        Ok(())
    }
}
