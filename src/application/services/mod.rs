// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::{
            content::ContentCommandService,
            users::{RegistrationSettings, UserCommandService},
        },
        dto::AuthenticatedUser,
        error::ApplicationError,
        locale::LocaleSettings,
        ports::{
            AuthProviderPort, ClockPort, MailerPort, SlugGeneratorPort, TokenManagerPort,
            session_revocation::SessionRevocationStore,
        },
        queries::{content::ContentQueryService, users::UserQueryService},
    },
    domain::content::{ContentReadRepository, ContentWriteRepository, SlugAssigner},
};

/// Tunables the services are built with, usually taken from `AppConfig`.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub locales: LocaleSettings,
    pub items_per_page: u32,
    pub slug_max_attempts: u32,
    pub registration: RegistrationSettings,
}

pub struct ApplicationServices {
    pub content_commands: Arc<ContentCommandService>,
    pub content_queries: Arc<ContentQueryService>,
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    token_manager: Arc<TokenManagerPort>,
    session_revocation_store: Arc<dyn SessionRevocationStore>,
    clock: Arc<ClockPort>,
}

impl ApplicationServices {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content_write_repo: Arc<dyn ContentWriteRepository>,
        content_read_repo: Arc<dyn ContentReadRepository>,
        auth_provider: Arc<AuthProviderPort>,
        token_manager: Arc<TokenManagerPort>,
        session_revocation_store: Arc<dyn SessionRevocationStore>,
        mailer: Arc<MailerPort>,
        clock: Arc<ClockPort>,
        slugger: Arc<SlugGeneratorPort>,
        settings: ServiceSettings,
    ) -> Self {
        let content_commands = Arc::new(ContentCommandService::new(
            Arc::clone(&content_write_repo),
            Arc::clone(&content_read_repo),
            SlugAssigner::new(settings.slug_max_attempts),
            Arc::clone(&slugger),
            settings.locales.clone(),
            Arc::clone(&clock),
        ));

        let content_queries = Arc::new(ContentQueryService::new(
            Arc::clone(&content_read_repo),
            settings.locales,
            settings.items_per_page,
        ));

        let user_commands = Arc::new(UserCommandService::new(
            Arc::clone(&auth_provider),
            Arc::clone(&token_manager),
            Arc::clone(&session_revocation_store),
            Arc::clone(&mailer),
            settings.registration,
        ));

        let user_queries = Arc::new(UserQueryService::new(
            Arc::clone(&auth_provider),
            Arc::clone(&clock),
        ));

        Self {
            content_commands,
            content_queries,
            user_commands,
            user_queries,
            token_manager,
            session_revocation_store,
            clock,
        }
    }

    pub fn token_manager(&self) -> Arc<TokenManagerPort> {
        Arc::clone(&self.token_manager)
    }

    pub fn clock(&self) -> Arc<ClockPort> {
        Arc::clone(&self.clock)
    }

    /// Verify a raw bearer token and reject it when its session was revoked.
    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let user = self.token_manager.authenticate(token).await?;

        if let Some(session_id) = &user.session_id {
            if self.session_revocation_store.is_revoked(session_id).await? {
                return Err(ApplicationError::unauthorized("session revoked"));
            }
        }

        Ok(user)
    }
}
