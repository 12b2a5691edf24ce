use super::{ContentCommandService, capability::ensure_capability};
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::{ContentId, ContentKind},
};

pub struct DeleteContentCommand {
    pub id: i64,
    pub kind: ContentKind,
}

impl ContentCommandService {
    pub async fn delete_content(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteContentCommand,
    ) -> ApplicationResult<()> {
        ensure_capability(actor, command.kind, "delete")?;

        let id = ContentId::new(command.id)?;
        let exists = self
            .read_repo
            .find_by_id(id)
            .await?
            .is_some_and(|item| item.kind == command.kind);
        if !exists {
            return Err(ApplicationError::not_found(format!(
                "{} item not found",
                command.kind
            )));
        }

        self.write_repo.delete(id).await?;
        tracing::info!(kind = %command.kind, id = command.id, "content deleted");
        Ok(())
    }
}
