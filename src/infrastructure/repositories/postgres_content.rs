// src/infrastructure/repositories/postgres_content.rs
use super::map_sqlx;
use crate::domain::content::{
    ContentId, ContentItem, ContentKind, ContentReadRepository, ContentUpdate,
    ContentWriteRepository, Locale, NewContent, NewTranslation, PageRequest, Slug, Title,
    Translation, TranslationId,
};
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use std::collections::HashMap;

const TRANSLATION_COLUMNS: &str =
    "id, content_id, locale, title, slug, summary, body, published, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresContentWriteRepository {
    pool: PgPool,
}

impl PostgresContentWriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Clone)]
pub struct PostgresContentReadRepository {
    pool: PgPool,
}

impl PostgresContentReadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ContentRow {
    id: i64,
    kind: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct TranslationRow {
    id: i64,
    content_id: i64,
    locale: String,
    title: String,
    slug: Option<String>,
    summary: Option<String>,
    body: String,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TranslationRow> for Translation {
    type Error = DomainError;

    fn try_from(row: TranslationRow) -> Result<Self, Self::Error> {
        Ok(Translation {
            id: TranslationId::new(row.id)?,
            content_id: ContentId::new(row.content_id)?,
            locale: Locale::new(row.locale)?,
            title: Title::new(row.title)?,
            slug: row.slug.filter(|s| !s.is_empty()).map(Slug::new).transpose()?,
            summary: row.summary,
            body: row.body,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn item_from_rows(row: ContentRow, translations: Vec<Translation>) -> DomainResult<ContentItem> {
    Ok(ContentItem {
        id: ContentId::new(row.id)?,
        kind: row.kind.parse()?,
        translations,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

/// Loads the translations of `rows` and assembles items in the rows' order.
async fn assemble(pool: &PgPool, rows: Vec<ContentRow>) -> DomainResult<Vec<ContentItem>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
    let translation_rows = sqlx::query_as::<_, TranslationRow>(&format!(
        "SELECT {TRANSLATION_COLUMNS} FROM content_translations
         WHERE content_id = ANY($1) ORDER BY content_id, locale"
    ))
    .bind(&ids)
    .fetch_all(pool)
    .await
    .map_err(map_sqlx)?;

    let mut by_content: HashMap<i64, Vec<Translation>> = HashMap::new();
    for row in translation_rows {
        let content_id = row.content_id;
        by_content
            .entry(content_id)
            .or_default()
            .push(Translation::try_from(row)?);
    }

    rows.into_iter()
        .map(|row| {
            let translations = by_content.remove(&row.id).unwrap_or_default();
            item_from_rows(row, translations)
        })
        .collect()
}

async fn load_item(pool: &PgPool, id: i64) -> DomainResult<Option<ContentItem>> {
    let row = sqlx::query_as::<_, ContentRow>(
        "SELECT id, kind, created_at, updated_at FROM contents WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(map_sqlx)?;

    match row {
        Some(row) => Ok(assemble(pool, vec![row]).await?.pop()),
        None => Ok(None),
    }
}

async fn insert_translation(
    tx: &mut Transaction<'_, Postgres>,
    content_id: i64,
    kind: ContentKind,
    translation: NewTranslation,
    at: DateTime<Utc>,
) -> DomainResult<()> {
    sqlx::query(
        "INSERT INTO content_translations
             (content_id, kind, locale, title, slug, summary, body, published, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)",
    )
    .bind(content_id)
    .bind(kind.as_str())
    .bind(translation.locale.as_str())
    .bind(translation.title.as_str())
    .bind(translation.slug.map(String::from))
    .bind(translation.summary)
    .bind(translation.body)
    .bind(translation.published)
    .bind(at)
    .execute(&mut **tx)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl ContentWriteRepository for PostgresContentWriteRepository {
    async fn insert(&self, content: NewContent) -> DomainResult<ContentItem> {
        let NewContent {
            kind,
            translations,
            created_at,
        } = content;

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO contents (kind, created_at, updated_at) VALUES ($1, $2, $2) RETURNING id",
        )
        .bind(kind.as_str())
        .bind(created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx)?;

        for translation in translations {
            insert_translation(&mut tx, id, kind, translation, created_at).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        load_item(&self.pool, id)
            .await?
            .ok_or_else(|| DomainError::Persistence("inserted content vanished".into()))
    }

    async fn update(&self, update: ContentUpdate) -> DomainResult<ContentItem> {
        let ContentUpdate {
            id,
            changed,
            added,
            updated_at,
        } = update;
        let content_id = i64::from(id);

        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let kind: Option<(String,)> = sqlx::query_as(
            "UPDATE contents SET updated_at = $1 WHERE id = $2 RETURNING kind",
        )
        .bind(updated_at)
        .bind(content_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(map_sqlx)?;
        let kind: ContentKind = kind
            .ok_or_else(|| DomainError::NotFound("content not found".into()))?
            .0
            .parse()?;

        for translation in changed {
            let mut builder: QueryBuilder<Postgres> =
                QueryBuilder::new("UPDATE content_translations SET title = ");
            builder.push_bind(translation.title.into_inner());
            builder.push(", slug = ");
            builder.push_bind(translation.slug.map(String::from));
            builder.push(", summary = ");
            builder.push_bind(translation.summary);
            builder.push(", body = ");
            builder.push_bind(translation.body);
            builder.push(", published = ");
            builder.push_bind(translation.published);
            builder.push(", updated_at = ");
            builder.push_bind(updated_at);
            builder.push(" WHERE id = ");
            builder.push_bind(i64::from(translation.id));
            builder.push(" AND content_id = ");
            builder.push_bind(content_id);

            let result = builder.build().execute(&mut *tx).await.map_err(map_sqlx)?;
            if result.rows_affected() == 0 {
                return Err(DomainError::NotFound("translation not found".into()));
            }
        }

        for translation in added {
            insert_translation(&mut tx, content_id, kind, translation, updated_at).await?;
        }
        tx.commit().await.map_err(map_sqlx)?;

        load_item(&self.pool, content_id)
            .await?
            .ok_or_else(|| DomainError::NotFound("content not found".into()))
    }

    async fn delete(&self, id: ContentId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(i64::from(id))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx)?;
        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound("content not found".into()));
        }
        Ok(())
    }
}

impl PostgresContentReadRepository {
    fn apply_filter<'a>(
        builder: &mut QueryBuilder<'a, Postgres>,
        kind: ContentKind,
        published_in: Option<&'a Locale>,
    ) {
        builder.push(" WHERE c.kind = ");
        builder.push_bind(kind.as_str());
        if let Some(locale) = published_in {
            builder.push(
                " AND EXISTS (SELECT 1 FROM content_translations t
                   WHERE t.content_id = c.id AND t.published = TRUE AND t.locale = ",
            );
            builder.push_bind(locale.as_str());
            builder.push(")");
        }
    }
}

#[async_trait]
impl ContentReadRepository for PostgresContentReadRepository {
    async fn find_by_id(&self, id: ContentId) -> DomainResult<Option<ContentItem>> {
        load_item(&self.pool, i64::from(id)).await
    }

    async fn find_by_slug(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
    ) -> DomainResult<Option<ContentItem>> {
        let content_id: Option<(i64,)> = sqlx::query_as(
            "SELECT content_id FROM content_translations
             WHERE kind = $1 AND locale = $2 AND slug = $3",
        )
        .bind(kind.as_str())
        .bind(locale.as_str())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        match content_id {
            Some((id,)) => load_item(&self.pool, id).await,
            None => Ok(None),
        }
    }

    async fn page(
        &self,
        kind: ContentKind,
        request: PageRequest,
        published_in: Option<&Locale>,
    ) -> DomainResult<(Vec<ContentItem>, u64)> {
        let mut count: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contents c");
        Self::apply_filter(&mut count, kind, published_in);
        let (total,) = count
            .build_query_as::<(i64,)>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let mut select: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT c.id, c.kind, c.created_at, c.updated_at FROM contents c");
        Self::apply_filter(&mut select, kind, published_in);
        select.push(" ORDER BY c.created_at DESC, c.id DESC LIMIT ");
        select.push_bind(i64::from(request.per_page));
        select.push(" OFFSET ");
        select.push_bind(i64::try_from(request.offset()).unwrap_or(i64::MAX));

        let rows = select
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx)?;

        let items = assemble(&self.pool, rows).await?;
        Ok((items, u64::try_from(total).unwrap_or_default()))
    }

    async fn slug_taken(
        &self,
        kind: ContentKind,
        slug: &Slug,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<bool> {
        let (taken,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (
                 SELECT 1 FROM content_translations
                 WHERE kind = $1 AND locale = $2 AND slug = $3
                   AND ($4::BIGINT IS NULL OR id <> $4)
             )",
        )
        .bind(kind.as_str())
        .bind(locale.as_str())
        .bind(slug.as_str())
        .bind(exclude.map(i64::from))
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;
        Ok(taken)
    }
}
