use super::UserCommandService;
use crate::application::ports::mail::MailMessage;

impl UserCommandService {
    /// Mail delivery never fails the surrounding operation.
    pub(super) async fn send_mail(&self, message: MailMessage) {
        let template = message.template.clone();
        if let Err(err) = self.mailer.send(message).await {
            tracing::warn!(error = %err, template = %template, "failed to send mail");
        }
    }
}
