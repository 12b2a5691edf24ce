use super::ContentQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto, Page},
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::ContentKind,
};

#[derive(Debug, Clone, Default)]
pub struct ListContentQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub lang: Option<String>,
}

impl ContentQueryService {
    /// Items with a published translation in the requested locale, each
    /// reduced to that translation.
    pub async fn list_published(
        &self,
        kind: ContentKind,
        query: ListContentQuery,
    ) -> ApplicationResult<Page<ContentDto>> {
        let locale = self.locales.resolve(query.lang.as_deref())?;
        let request = self.page_request(query.page, query.per_page);

        let (items, total) = self.read_repo.page(kind, request, Some(&locale)).await?;
        let items = items
            .into_iter()
            .map(|item| item.localized(&locale, true).into())
            .collect();
        Ok(Page::new(items, total, request.page, request.per_page))
    }

    /// Every item of `kind` with all of its translations.
    pub async fn list_all(
        &self,
        actor: &AuthenticatedUser,
        kind: ContentKind,
        query: ListContentQuery,
    ) -> ApplicationResult<Page<ContentDto>> {
        if !actor.has_capability(kind.as_str(), "read") {
            return Err(ApplicationError::forbidden(format!(
                "missing capability {kind}:read"
            )));
        }

        let request = self.page_request(query.page, query.per_page);
        let (items, total) = self.read_repo.page(kind, request, None).await?;
        let items = items.into_iter().map(Into::into).collect();
        Ok(Page::new(items, total, request.page, request.per_page))
    }
}
