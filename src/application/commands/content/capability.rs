use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::content::ContentKind,
};

pub(super) fn ensure_capability(
    user: &AuthenticatedUser,
    kind: ContentKind,
    action: &str,
) -> ApplicationResult<()> {
    let resource = kind.as_str();
    if user.has_capability(resource, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {resource}:{action}"
        )))
    }
}
