use crate::application::{
    ApplicationResult,
    ports::mail::{MailMessage, Mailer},
};
use async_trait::async_trait;

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Debug, Clone)]
pub struct TracingMailer {
    from: String,
}

impl TracingMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for TracingMailer {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()> {
        tracing::info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            template = %message.template,
            data = %message.data,
            "mail queued"
        );
        Ok(())
    }
}
