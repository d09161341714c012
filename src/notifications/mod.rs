pub mod log_mailer;
pub mod templates;

use async_trait::async_trait;

use crate::error::NotificationError;

pub use log_mailer::LogMailer;
pub use templates::render_email;

/// Free-form values a template may interpolate.
pub type TemplateData = serde_json::Map<String, serde_json::Value>;

/// Delivery capability for templated emails.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send_email(
        &self,
        subject: &str,
        recipients: &[String],
        template_id: &str,
        template_data: Option<&TemplateData>,
    ) -> Result<(), NotificationError>;
}

/// The emails sent over a workout's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    WorkoutRequested,
    WorkoutUpdated,
    WorkoutApproved,
}

impl EmailTemplate {
    pub const ALL: [EmailTemplate; 3] = [
        EmailTemplate::WorkoutRequested,
        EmailTemplate::WorkoutUpdated,
        EmailTemplate::WorkoutApproved,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            EmailTemplate::WorkoutRequested => "workoutRequested",
            EmailTemplate::WorkoutUpdated => "workoutUpdated",
            EmailTemplate::WorkoutApproved => "workoutApproved",
        }
    }

    pub fn subject(&self) -> &'static str {
        match self {
            EmailTemplate::WorkoutRequested => "A new workout has been requested",
            EmailTemplate::WorkoutUpdated => "Your workout has been updated",
            EmailTemplate::WorkoutApproved => "Your workout has been approved",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}
