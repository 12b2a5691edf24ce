use super::{ContentCommandService, TranslationInput, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentId, ContentKind, ContentUpdate, TranslationUpdate},
};

/// Translations for locales the item already has are replaced; others are added.
pub struct UpdateContentCommand {
    pub id: i64,
    pub kind: ContentKind,
    pub translations: Vec<TranslationInput>,
}

impl ContentCommandService {
    pub async fn update_content(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, command.kind, "update")?;

        let id = ContentId::new(command.id)?;
        let item = self
            .read_repo
            .find_by_id(id)
            .await?
            .filter(|item| item.kind == command.kind)
            .ok_or_else(|| ApplicationError::not_found(format!("{} item not found", command.kind)))?;

        let prepared = self.prepare(command.translations)?;
        let mut update = ContentUpdate::new(id, self.clock.now());
        for input in prepared {
            if let Some(existing) = item.translation(&input.locale) {
                let slug = self
                    .assign_slug(item.kind, &input.candidate, &input.locale, Some(existing.id))
                    .await?;
                update = update.with_changed(TranslationUpdate {
                    id: existing.id,
                    title: input.title,
                    slug,
                    summary: input.summary,
                    body: input.body,
                    published: input.published,
                });
            } else {
                let added = self.new_translation(item.kind, input).await?;
                update = update.with_added(added);
            }
        }

        let updated = self.write_repo.update(update).await?;
        tracing::info!(
            kind = %updated.kind,
            id = i64::from(updated.id),
            user_id = i64::from(actor.id),
            "content updated"
        );
        Ok(updated.into())
    }
}
