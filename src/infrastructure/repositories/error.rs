use crate::domain::errors::DomainError;

const CNT_TRANSLATION_SLUG: &str = "content_translations_kind_locale_slug_key";
const CNT_TRANSLATION_LOCALE: &str = "content_translations_content_id_locale_key";
const CNT_TRANSLATION_CONTENT: &str = "content_translations_content_id_fkey";
const CNT_USER_EMAIL: &str = "users_email_key";
const CNT_USERS_GROUPS_GROUP: &str = "users_groups_group_id_fkey";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_TRANSLATION_SLUG => {
                        DomainError::Conflict("slug already exists for this locale".into())
                    }
                    CNT_TRANSLATION_LOCALE => {
                        DomainError::Conflict("translation already exists for this locale".into())
                    }
                    CNT_TRANSLATION_CONTENT => DomainError::NotFound("content not found".into()),
                    CNT_USER_EMAIL => DomainError::Conflict("email already exists".into()),
                    CNT_USERS_GROUPS_GROUP => DomainError::NotFound("group not found".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23503" => {
                        return DomainError::NotFound("referenced record not found".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_persistence_failures() {
        let err = map_sqlx(sqlx::Error::RowNotFound);
        assert!(matches!(err, DomainError::Persistence(_)));
    }
}
