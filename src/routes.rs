use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{health, workouts};

pub fn create_router(workouts_state: workouts::WorkoutsState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Workout routes
        .route("/workouts", get(workouts::list).post(workouts::request))
        .route("/workouts/{id}", put(workouts::update))
        .route("/workouts/{id}/approve", post(workouts::approve))
        .route("/workouts/{id}/complete", post(workouts::complete))
        .with_state(workouts_state)
}
