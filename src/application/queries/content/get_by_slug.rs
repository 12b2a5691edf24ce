use super::ContentQueryService;
use crate::{
    application::{
        dto::ContentDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentKind, Slug},
};

pub struct GetContentBySlugQuery {
    pub kind: ContentKind,
    pub slug: String,
    pub lang: Option<String>,
}

impl ContentQueryService {
    /// Unpublished translations are reported as missing.
    pub async fn get_by_slug(&self, query: GetContentBySlugQuery) -> ApplicationResult<ContentDto> {
        let locale = self.locales.resolve(query.lang.as_deref())?;
        let not_found = || ApplicationError::not_found(format!("{} item not found", query.kind));
        let slug = Slug::new(query.slug).map_err(|_| not_found())?;

        let item = self
            .read_repo
            .find_by_slug(query.kind, &slug, &locale)
            .await?
            .filter(|item| item.published_translation(&locale).is_some())
            .ok_or_else(not_found)?;

        Ok(item.localized(&locale, true).into())
    }
}
