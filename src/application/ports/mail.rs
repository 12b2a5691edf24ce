// src/application/ports/mail.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct MailMessage {
    /// Template key, e.g. `auth.welcome`.
    pub template: String,
    pub to: String,
    pub subject: String,
    pub data: Value,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()>;
}
