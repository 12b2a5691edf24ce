use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::auth::AuthError,
};
use crate::domain::user::PlainPassword;

pub(super) const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks a password chosen by the user. The confirmation is only compared
/// when the form sent one.
pub(super) fn validate_new_password(
    password: &str,
    confirmation: Option<&str>,
) -> ApplicationResult<PlainPassword> {
    if password.trim().is_empty() {
        return Err(AuthError::PasswordRequired.into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    if confirmation.is_some_and(|c| c != password) {
        return Err(ApplicationError::validation(
            "password confirmation does not match",
        ));
    }
    Ok(PlainPassword::new(password))
}
