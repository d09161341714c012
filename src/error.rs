use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::WorkoutStatus;

/// Failures surfaced by a [`crate::repositories::WorkoutStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Workout {0} not found")]
    NotFound(i64),

    #[error("Workout {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: i64,
        from: WorkoutStatus,
        to: WorkoutStatus,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Failures surfaced by a [`crate::notifications::NotificationGateway`].
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("No recipients given")]
    NoRecipients,

    #[error("Unknown email template: {0}")]
    UnknownTemplate(String),

    #[error("Template render error: {0}")]
    Render(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Persistence(#[from] StoreError),

    #[error(transparent)]
    Notification(#[from] NotificationError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Persistence(StoreError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            AppError::Persistence(StoreError::InvalidTransition { .. }) => {
                (StatusCode::CONFLICT, self.to_string())
            }
            AppError::Persistence(e) => {
                tracing::error!("Persistence error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
            AppError::Notification(e) => {
                tracing::error!("Notification error: {:?}", e);
                (StatusCode::BAD_GATEWAY, "Notification failed".to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
