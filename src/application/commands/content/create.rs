use super::{ContentCommandService, TranslationInput, capability::ensure_capability};
use crate::{
    application::{
        dto::{AuthenticatedUser, ContentDto},
        error::ApplicationResult,
    },
    domain::content::{ContentKind, NewContent},
};

pub struct CreateContentCommand {
    pub kind: ContentKind,
    pub translations: Vec<TranslationInput>,
}

impl ContentCommandService {
    pub async fn create_content(
        &self,
        actor: &AuthenticatedUser,
        command: CreateContentCommand,
    ) -> ApplicationResult<ContentDto> {
        ensure_capability(actor, command.kind, "create")?;

        let prepared = self.prepare(command.translations)?;
        let mut translations = Vec::with_capacity(prepared.len());
        for item in prepared {
            translations.push(self.new_translation(command.kind, item).await?);
        }

        let created = self
            .write_repo
            .insert(NewContent {
                kind: command.kind,
                translations,
                created_at: self.clock.now(),
            })
            .await?;

        tracing::info!(
            kind = %created.kind,
            id = i64::from(created.id),
            user_id = i64::from(actor.id),
            "content created"
        );
        Ok(created.into())
    }
}
