// src/domain/content/services/mod.rs
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::content::repository::ContentReadRepository;
use crate::domain::content::value_objects::{
    ContentKind, Locale, MAX_SLUG_LENGTH, Slug, TranslationId,
};
use crate::domain::errors::{DomainError, DomainResult};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;
const RANDOM_SUFFIX_ATTEMPTS: u32 = 5;
const RANDOM_SUFFIX_LEN: usize = 8;

/// Read-side view the slug assigner needs: does another translation already
/// hold this slug in this locale?
#[async_trait]
pub trait SlugLookup: Send + Sync {
    async fn is_taken(
        &self,
        slug: &Slug,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<bool>;
}

/// Adapts a content repository to [`SlugLookup`] for a single content kind.
pub struct KindScopedSlugLookup<'a> {
    repo: &'a dyn ContentReadRepository,
    kind: ContentKind,
}

impl<'a> KindScopedSlugLookup<'a> {
    pub fn new(repo: &'a dyn ContentReadRepository, kind: ContentKind) -> Self {
        Self { repo, kind }
    }
}

#[async_trait]
impl SlugLookup for KindScopedSlugLookup<'_> {
    async fn is_taken(
        &self,
        slug: &Slug,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<bool> {
        self.repo.slug_taken(self.kind, slug, locale, exclude).await
    }
}

/// Domain service producing locale-scoped unique slugs for translations.
///
/// The candidate is tried as-is, then with `-1`, `-2`, ... appended. After
/// `max_attempts` numeric suffixes a short random suffix is used instead.
/// The check is a read followed by the caller's write, so the storage layer
/// must still enforce uniqueness.
#[derive(Debug, Clone, Copy)]
pub struct SlugAssigner {
    max_attempts: u32,
}

impl Default for SlugAssigner {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl SlugAssigner {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Returns `None` for a blank candidate without touching storage.
    /// `exclude` is the translation being updated, so it never collides with
    /// its own slug.
    pub async fn assign<L>(
        &self,
        lookup: &L,
        candidate: Option<&str>,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> DomainResult<Option<Slug>>
    where
        L: SlugLookup + ?Sized,
    {
        let Some(base) = candidate.filter(|c| !c.trim().is_empty()) else {
            return Ok(None);
        };

        let mut attempt = Slug::new(base)?;
        let mut suffix: u32 = 0;
        loop {
            if !lookup.is_taken(&attempt, locale, exclude).await? {
                return Ok(Some(attempt));
            }
            if suffix >= self.max_attempts {
                break;
            }
            suffix += 1;
            attempt = suffixed(base, &suffix.to_string())?;
        }

        tracing::warn!(
            slug = base,
            locale = %locale,
            attempts = self.max_attempts,
            "numeric slug suffixes exhausted, falling back to a random suffix"
        );

        for _ in 0..RANDOM_SUFFIX_ATTEMPTS {
            let attempt = suffixed(base, &random_suffix())?;
            if !lookup.is_taken(&attempt, locale, exclude).await? {
                return Ok(Some(attempt));
            }
        }

        Err(DomainError::Conflict(format!(
            "could not find a free slug for '{base}' in locale {locale}"
        )))
    }
}

/// `{base}-{suffix}`, shortening `base` so the result still fits in a slug.
fn suffixed(base: &str, suffix: &str) -> DomainResult<Slug> {
    let budget = MAX_SLUG_LENGTH.saturating_sub(suffix.len() + 1);
    let mut end = base.len().min(budget);
    while !base.is_char_boundary(end) {
        end -= 1;
    }
    let stem = base[..end].trim_end_matches('-');
    Slug::new(format!("{stem}-{suffix}"))
}

fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(RANDOM_SUFFIX_LEN);
    suffix
}
