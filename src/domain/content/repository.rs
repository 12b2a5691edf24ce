use crate::domain::content::entity::{ContentItem, ContentUpdate, NewContent};
use crate::domain::content::value_objects::{
    ContentId, ContentKind, Locale, Slug, TranslationId,
};
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

/// 1-based page number plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page)
    }
}

#[async_trait]
pub trait ContentWriteRepository: Send + Sync {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem>;
    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem>;
    async fn delete(&self, id: ContentId) -> DomainResult<()>;
}

#[async_trait]
pub trait ContentReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<ContentItem>>;

    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
    ) -> DomainResult<Option<ContentItem>>;

    /// Returns one page of items (newest first) and the total item count.
    /// With `published_in` set, only items holding a published translation in
    /// that locale are counted and returned.
    async fn page(
        &self,
        kind: ContentKind,
        request: PageRequest,
        published_in: Option<&Locale>,
    ) -> DomainResult<(Vec<ContentItem>, u64)>;

    /// Whether a translation of `kind` other than `exclude` already holds
    /// `slug` in `locale`.
    async fn slug_taken(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<bool>;
}

#[cfg(test)]
mod tests {
    use super::PageRequest;

    #[test]
    fn page_request_clamps_to_first_page() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page, 1);
        assert_eq!(request.per_page, 1);
        assert_eq!(request.offset(), 0);
        assert_eq!(PageRequest::new(3, 10).offset(), 20);
    }
}
