// tests/support/mocks/mail.rs
use async_trait::async_trait;
use folio_cms::application::{
    ApplicationResult,
    ports::mail::{MailMessage, Mailer},
};
use std::sync::Mutex;

/// Keeps every message instead of delivering it.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<MailMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<MailMessage> {
        self.sent.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: MailMessage) -> ApplicationResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}
