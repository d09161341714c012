use askama::Template;

use super::{EmailTemplate, TemplateData};
use crate::error::NotificationError;

#[derive(Template)]
#[template(path = "email/workout_requested.txt")]
struct WorkoutRequestedEmail {
    details: Vec<(String, String)>,
}

#[derive(Template)]
#[template(path = "email/workout_updated.txt")]
struct WorkoutUpdatedEmail {
    details: Vec<(String, String)>,
}

#[derive(Template)]
#[template(path = "email/workout_approved.txt")]
struct WorkoutApprovedEmail {
    details: Vec<(String, String)>,
}

fn details(data: Option<&TemplateData>) -> Vec<(String, String)> {
    data.map(|map| {
        map.iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect()
    })
    .unwrap_or_default()
}

/// Render the plain-text body for `template_id`.
pub fn render_email(
    template_id: &str,
    data: Option<&TemplateData>,
) -> Result<String, NotificationError> {
    let template = EmailTemplate::from_id(template_id)
        .ok_or_else(|| NotificationError::UnknownTemplate(template_id.to_string()))?;
    let details = details(data);

    let rendered = match template {
        EmailTemplate::WorkoutRequested => WorkoutRequestedEmail { details }.render(),
        EmailTemplate::WorkoutUpdated => WorkoutUpdatedEmail { details }.render(),
        EmailTemplate::WorkoutApproved => WorkoutApprovedEmail { details }.render(),
    };

    rendered.map_err(|e| NotificationError::Render(e.to_string()))
}
