use super::ContentQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentId, ContentKind},
};

pub struct GetContentByIdQuery {
    pub kind: ContentKind,
    pub id: i64,
}

impl ContentQueryService {
    pub async fn get_by_id(
        &self,
        actor: &AuthenticatedUser,
        query: GetContentByIdQuery,
    ) -> ApplicationResult<ContentDto> {
        if !actor.has_capability(query.kind.as_str(), "read") {
            return Err(ApplicationError::forbidden(format!(
                "missing capability {}:read",
                query.kind
            )));
        }

        let id = ContentId::new(query.id)?;
        let item = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|item| item.kind == query.kind)
            .ok_or_else(|| ApplicationError::not_found(format!("{} item not found", query.kind)))?;
        Ok(item.into())
    }
}
