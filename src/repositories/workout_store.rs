use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{NewWorkout, Workout, WorkoutChanges};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Persistence capability for workout records.
///
/// The store owns every record and is the only place lifecycle transitions are
/// enforced. Callers never cache what it returns.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    /// Every known workout, in store-defined order.
    async fn fetch_workouts(&self) -> StoreResult<Vec<Workout>>;

    /// Workouts whose athlete matches exactly.
    async fn filter_workouts_by_athlete(&self, athlete: &str) -> StoreResult<Vec<Workout>>;

    /// Workouts whose coach matches exactly.
    async fn filter_workouts_by_coach(&self, coach: &str) -> StoreResult<Vec<Workout>>;

    /// Persist a new workout and return it with its assigned id.
    async fn new_workout(&self, workout: NewWorkout) -> StoreResult<Workout>;

    /// Overwrite the schedule and description of a workout, keeping its parties.
    async fn update_workout(&self, id: i64, changes: WorkoutChanges) -> StoreResult<Workout>;

    /// Move a requested workout to approved.
    async fn approve_workout(&self, id: i64) -> StoreResult<Workout>;

    /// Move an approved workout to completed.
    async fn complete_workout(&self, id: i64) -> StoreResult<()>;
}
