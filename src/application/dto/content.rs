use crate::domain::content::{ContentItem, ContentKind, Translation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TranslationDto {
    pub id: i64,
    pub locale: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Translation> for TranslationDto {
    fn from(t: Translation) -> Self {
        Self {
            id: t.id.into(),
            locale: t.locale.into(),
            title: t.title.into_inner(),
            slug: t.slug.map(String::from),
            summary: t.summary,
            body: t.body,
            published: t.published,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContentDto {
    pub id: i64,
    pub kind: ContentKind,
    pub translations: Vec<TranslationDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ContentItem> for ContentDto {
    fn from(item: ContentItem) -> Self {
        Self {
            id: item.id.into(),
            kind: item.kind,
            translations: item.translations.into_iter().map(Into::into).collect(),
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}
