use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{RequestNewWorkout, UpdateWorkout};
use crate::services::WorkoutCoordinator;

#[derive(Clone)]
pub struct WorkoutsState {
    pub coordinator: WorkoutCoordinator,
}

// Query params
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    athlete: Option<String>,
    coach: Option<String>,
}

pub async fn list(
    State(state): State<WorkoutsState>,
    Query(query): Query<ListQuery>,
) -> Result<Response> {
    let workouts = match (query.athlete, query.coach) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Filter by athlete or by coach, not both".to_string(),
            ))
        }
        (Some(athlete), None) => state.coordinator.get_by_athlete(&athlete).await?,
        (None, Some(coach)) => state.coordinator.get_by_coach(&coach).await?,
        (None, None) => state.coordinator.all().await?,
    };

    Ok(Json(workouts).into_response())
}

pub async fn request(
    State(state): State<WorkoutsState>,
    Json(payload): Json<RequestNewWorkout>,
) -> Result<Response> {
    let workout = state.coordinator.request(payload).await?;

    Ok((StatusCode::CREATED, Json(workout)).into_response())
}

pub async fn update(
    State(state): State<WorkoutsState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateWorkout>,
) -> Result<Response> {
    let workout = state.coordinator.update(id, payload).await?;

    Ok(Json(workout).into_response())
}

pub async fn approve(State(state): State<WorkoutsState>, Path(id): Path<i64>) -> Result<Response> {
    state.coordinator.approve(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

pub async fn complete(
    State(state): State<WorkoutsState>,
    Path(id): Path<i64>,
) -> Result<Response> {
    state.coordinator.complete(id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
