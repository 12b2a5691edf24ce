// tests/support/mocks/content_repo.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_cms::domain::content::{
    ContentId, ContentItem, ContentKind, ContentReadRepository, ContentUpdate,
    ContentWriteRepository, Locale, NewContent, NewTranslation, PageRequest, Slug, Translation,
    TranslationId,
};
use folio_cms::domain::errors::{DomainError, DomainResult};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct State {
    next_content_id: i64,
    next_translation_id: i64,
    items: BTreeMap<i64, ContentItem>,
    slug_checks: usize,
}

impl State {
    /// Mirrors the `(kind, locale, slug)` unique constraint.
    fn ensure_unique(
        &self,
        kind: ContentKind,
        locale: &Locale,
        slug: &Option<Slug>,
        own: Option<TranslationId>,
    ) -> DomainResult<()> {
        let Some(slug) = slug else { return Ok(()) };
        let clash = self
            .items
            .values()
            .filter(|item| item.kind == kind)
            .flat_map(|item| item.translations.iter())
            .any(|t| &t.locale == locale && t.slug.as_ref() == Some(slug) && Some(t.id) != own);
        if clash {
            return Err(DomainError::Conflict(format!(
                "slug '{slug}' already used in locale '{locale}'"
            )));
        }
        Ok(())
    }

    fn translation(
        &mut self,
        content_id: ContentId,
        new: NewTranslation,
        at: DateTime<Utc>,
    ) -> Translation {
        self.next_translation_id += 1;
        Translation {
            id: TranslationId::new(self.next_translation_id).unwrap(),
            content_id,
            locale: new.locale,
            title: new.title,
            slug: new.slug,
            summary: new.summary,
            body: new.body,
            published: new.published,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Both content repositories over one shared map.
#[derive(Default)]
pub struct InMemoryContentRepo {
    state: Mutex<State>,
}

impl InMemoryContentRepo {
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().items.len()
    }

    /// Number of `slug_taken` lookups served so far.
    pub fn slug_checks(&self) -> usize {
        self.state.lock().unwrap().slug_checks
    }
}

#[async_trait]
impl ContentWriteRepository for InMemoryContentRepo {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem> {
        let mut state = self.state.lock().unwrap();
        for t in &content.translations {
            state.ensure_unique(content.kind, &t.locale, &t.slug, None)?;
        }

        state.next_content_id += 1;
        let id = ContentId::new(state.next_content_id)?;
        let translations = content
            .translations
            .into_iter()
            .map(|t| state.translation(id, t, content.created_at))
            .collect();
        let item = ContentItem {
            id,
            kind: content.kind,
            translations,
            created_at: content.created_at,
            updated_at: content.created_at,
        };
        state.items.insert(i64::from(id), item.clone());
        Ok(item)
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let mut state = self.state.lock().unwrap();
        let mut item = state
            .items
            .get(&i64::from(update.id))
            .cloned()
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?;

        for change in update.changed {
            let locale = item
                .translations
                .iter()
                .find(|t| t.id == change.id)
                .map(|t| t.locale.clone())
                .ok_or_else(|| DomainError::NotFound("translation not found".into()))?;
            state.ensure_unique(item.kind, &locale, &change.slug, Some(change.id))?;
            if let Some(t) = item.translations.iter_mut().find(|t| t.id == change.id) {
                t.title = change.title;
                t.slug = change.slug;
                t.summary = change.summary;
                t.body = change.body;
                t.published = change.published;
                t.updated_at = update.updated_at;
            }
        }
        for added in update.added {
            state.ensure_unique(item.kind, &added.locale, &added.slug, None)?;
            let t = state.translation(item.id, added, update.updated_at);
            item.translations.push(t);
        }
        item.updated_at = update.updated_at;
        state.items.insert(i64::from(item.id), item.clone());
        Ok(item)
    }

    async fn delete(&self, id: ContentId) -> DomainResult<()> {
        let mut state = self.state.lock().unwrap();
        state
            .items
            .remove(&i64::from(id))
            .map(|_| ())
            .ok_or_else(|| DomainError::NotFound("content not found".into()))
    }
}

#[async_trait]
impl ContentReadRepository for InMemoryContentRepo {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<ContentItem>> {
        Ok(self.state.lock().unwrap().items.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
    ) -> DomainResult<Option<ContentItem>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .items
            .values()
            .find(|item| {
                item.kind == kind
                    && item
                        .translations
                        .iter()
                        .any(|t| &t.locale == locale && t.slug.as_ref() == Some(slug))
            })
            .cloned())
    }

    async fn page(
        &self,
        kind: ContentKind,
        request: PageRequest,
        published_in: Option<&Locale>,
    ) -> DomainResult<(Vec<ContentItem>, u64)> {
        let state = self.state.lock().unwrap();
        let mut matching: Vec<ContentItem> = state
            .items
            .values()
            .filter(|item| item.kind == kind)
            .filter(|item| published_in.is_none_or(|l| item.published_translation(l).is_some()))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| i64::from(b.id).cmp(&i64::from(a.id)))
        });

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap())
            .take(request.per_page as usize)
            .collect();
        Ok((items, total))
    }

    async fn slug_taken(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.slug_checks += 1;
        Ok(state.ensure_unique(kind, locale, &Some(slug.clone()), exclude).is_err())
    }
}
