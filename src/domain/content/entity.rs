use crate::domain::content::value_objects::{
    ContentId, ContentKind, Locale, Slug, Title, TranslationId,
};
use chrono::{DateTime, Utc};

/// One localized variant of a content item.
#[derive(Debug, Clone)]
pub struct Translation {
    pub id: TranslationId,
    pub content_id: ContentId,
    pub locale: Locale,
    pub title: Title,
    pub slug: Option<Slug>,
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ContentItem {
    pub id: ContentId,
    pub kind: ContentKind,
    pub translations: Vec<Translation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContentItem {
    pub fn translation(&self, locale: &Locale) -> Option<&Translation> {
        self.translations.iter().find(|t| &t.locale == locale)
    }

    pub fn published_translation(&self, locale: &Locale) -> Option<&Translation> {
        self.translation(locale).filter(|t| t.published)
    }

    /// Keep only the translation for `locale`, dropping unpublished ones when
    /// `published_only` is set.
    pub fn localized(mut self, locale: &Locale, published_only: bool) -> Self {
        self.translations
            .retain(|t| &t.locale == locale && (t.published || !published_only));
        self
    }
}

#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub locale: Locale,
    pub title: Title,
    pub slug: Option<Slug>,
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
}

#[derive(Debug, Clone)]
pub struct NewContent {
    pub kind: ContentKind,
    pub translations: Vec<NewTranslation>,
    pub created_at: DateTime<Utc>,
}

/// Full replacement of an existing translation's mutable fields.
#[derive(Debug, Clone)]
pub struct TranslationUpdate {
    pub id: TranslationId,
    pub title: Title,
    pub slug: Option<Slug>,
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
}

#[derive(Debug, Clone)]
pub struct ContentUpdate {
    pub id: ContentId,
    pub changed: Vec<TranslationUpdate>,
    pub added: Vec<NewTranslation>,
    pub updated_at: DateTime<Utc>,
}

impl ContentUpdate {
    pub fn new(id: ContentId, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            changed: Vec::new(),
            added: Vec::new(),
            updated_at,
        }
    }

    pub fn with_changed(mut self, update: TranslationUpdate) -> Self {
        self.changed.push(update);
        self
    }

    pub fn with_added(mut self, translation: NewTranslation) -> Self {
        self.added.push(translation);
        self
    }
}
