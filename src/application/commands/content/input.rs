// src/application/commands/content/input.rs
use super::ContentCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::content::{
        ContentKind, KindScopedSlugLookup, Locale, NewTranslation, Slug, Title, TranslationId,
    },
};
use std::collections::HashSet;

/// Per-locale fields as submitted by an admin form.
#[derive(Debug, Clone, Default)]
pub struct TranslationInput {
    pub lang: Option<String>,
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
}

/// A validated input whose slug has not been assigned yet.
pub(super) struct PreparedTranslation {
    pub locale: Locale,
    pub title: Title,
    pub candidate: String,
    pub summary: Option<String>,
    pub body: String,
    pub published: bool,
}

impl ContentCommandService {
    pub(super) fn prepare(
        &self,
        inputs: Vec<TranslationInput>,
    ) -> ApplicationResult<Vec<PreparedTranslation>> {
        if inputs.is_empty() {
            return Err(ApplicationError::validation(
                "at least one translation is required",
            ));
        }

        let mut seen = HashSet::new();
        let mut prepared = Vec::with_capacity(inputs.len());
        for input in inputs {
            let locale = self.locales.resolve(input.lang.as_deref())?;
            if !seen.insert(locale.clone()) {
                return Err(ApplicationError::validation(format!(
                    "duplicate translation for locale '{locale}'"
                )));
            }
            let candidate = input
                .slug
                .as_deref()
                .map(|raw| self.slugger.slugify(raw))
                .unwrap_or_default();

            prepared.push(PreparedTranslation {
                locale,
                title: Title::new(input.title)?,
                candidate,
                summary: input.summary.filter(|s| !s.trim().is_empty()),
                body: input.body,
                published: input.published,
            });
        }
        Ok(prepared)
    }

    pub(super) async fn assign_slug(
        &self,
        kind: ContentKind,
        candidate: &str,
        locale: &Locale,
        exclude: Option<TranslationId>,
    ) -> ApplicationResult<Option<Slug>> {
        let lookup = KindScopedSlugLookup::new(self.read_repo.as_ref(), kind);
        let slug = self
            .slug_assigner
            .assign(&lookup, Some(candidate), locale, exclude)
            .await?;
        Ok(slug)
    }

    pub(super) async fn new_translation(
        &self,
        kind: ContentKind,
        prepared: PreparedTranslation,
    ) -> ApplicationResult<NewTranslation> {
        let slug = self
            .assign_slug(kind, &prepared.candidate, &prepared.locale, None)
            .await?;
        Ok(NewTranslation {
            locale: prepared.locale,
            title: prepared.title,
            slug,
            summary: prepared.summary,
            body: prepared.body,
            published: prepared.published,
        })
    }
}
