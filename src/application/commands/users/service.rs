use std::sync::Arc;

use crate::application::ports::{
    auth::AuthProvider, mail::Mailer, security::TokenManager,
    session_revocation::SessionRevocationStore,
};
use crate::domain::user::GroupId;

/// How self-service registration behaves.
#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub default_group: GroupId,
    pub requires_confirmation: bool,
    pub site_name: String,
}

pub struct UserCommandService {
    pub(super) auth: Arc<dyn AuthProvider>,
    pub(super) token_manager: Arc<dyn TokenManager>,
    pub(super) session_revocation_store: Arc<dyn SessionRevocationStore>,
    pub(super) mailer: Arc<dyn Mailer>,
    pub(super) registration: RegistrationSettings,
}

impl UserCommandService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        token_manager: Arc<dyn TokenManager>,
        session_revocation_store: Arc<dyn SessionRevocationStore>,
        mailer: Arc<dyn Mailer>,
        registration: RegistrationSettings,
    ) -> Self {
        Self {
            auth,
            token_manager,
            session_revocation_store,
            mailer,
            registration,
        }
    }
}
