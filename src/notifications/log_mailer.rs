use async_trait::async_trait;
use uuid::Uuid;

use super::{render_email, NotificationGateway, TemplateData};
use crate::error::NotificationError;

/// Gateway that renders each email and writes it to the log instead of a mail server.
#[derive(Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl NotificationGateway for LogMailer {
    async fn send_email(
        &self,
        subject: &str,
        recipients: &[String],
        template_id: &str,
        template_data: Option<&TemplateData>,
    ) -> Result<(), NotificationError> {
        let to: Vec<&str> = recipients
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .collect();
        if to.is_empty() {
            return Err(NotificationError::NoRecipients);
        }

        let body = render_email(template_id, template_data)?;
        let message_id = Uuid::new_v4();

        tracing::info!(
            %message_id,
            from = %self.from,
            to = ?to,
            template = template_id,
            "Sending email: {}",
            subject
        );
        tracing::debug!(%message_id, "Email body:\n{}", body);

        Ok(())
    }
}
