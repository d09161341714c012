//! Workout lifecycle coordination.
//!
//! Each mutating operation is a plain two-step sequence: one store call, then at
//! most one notification. There is no transaction spanning the two, so a
//! notification failure is reported even though the store write already landed.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{NewWorkout, RequestNewWorkout, UpdateWorkout, Workout, WorkoutChanges};
use crate::notifications::{EmailTemplate, NotificationGateway};
use crate::repositories::WorkoutStore;

#[derive(Clone)]
pub struct WorkoutCoordinator {
    store: Arc<dyn WorkoutStore>,
    notifier: Arc<dyn NotificationGateway>,
}

impl WorkoutCoordinator {
    pub fn new(store: Arc<dyn WorkoutStore>, notifier: Arc<dyn NotificationGateway>) -> Self {
        Self { store, notifier }
    }

    pub async fn all(&self) -> Result<Vec<Workout>> {
        Ok(self.store.fetch_workouts().await?)
    }

    pub async fn get_by_athlete(&self, athlete: &str) -> Result<Vec<Workout>> {
        Ok(self.store.filter_workouts_by_athlete(athlete).await?)
    }

    pub async fn get_by_coach(&self, coach: &str) -> Result<Vec<Workout>> {
        Ok(self.store.filter_workouts_by_coach(coach).await?)
    }

    /// Create a workout in the requested stage and tell the coach about it.
    ///
    /// No conflict or past-time checks are made.
    pub async fn request(&self, r: RequestNewWorkout) -> Result<Workout> {
        let workout = self.store.new_workout(NewWorkout::from(r)).await?;
        tracing::info!(
            "Workout {} requested by {} with {}",
            workout.id,
            workout.athlete,
            workout.coach
        );

        self.notify(
            EmailTemplate::WorkoutRequested,
            vec![workout.coach.clone()],
            workout.id,
        )
        .await?;

        Ok(workout)
    }

    /// Overwrite schedule and description, then tell both parties.
    pub async fn update(&self, id: i64, u: UpdateWorkout) -> Result<Workout> {
        let workout = self
            .store
            .update_workout(id, WorkoutChanges::from(u))
            .await?;
        tracing::info!("Workout {} updated", workout.id);

        self.notify(
            EmailTemplate::WorkoutUpdated,
            vec![workout.coach.clone(), workout.athlete.clone()],
            workout.id,
        )
        .await?;

        Ok(workout)
    }

    /// Approve a requested workout and tell both parties. The approved record is not returned.
    pub async fn approve(&self, id: i64) -> Result<()> {
        let workout = self.store.approve_workout(id).await?;
        tracing::info!("Workout {} approved", workout.id);

        self.notify(
            EmailTemplate::WorkoutApproved,
            vec![workout.coach, workout.athlete],
            id,
        )
        .await
    }

    /// Mark an approved workout completed. Nobody is notified.
    pub async fn complete(&self, id: i64) -> Result<()> {
        self.store.complete_workout(id).await?;
        tracing::info!("Workout {} completed", id);
        Ok(())
    }

    async fn notify(
        &self,
        template: EmailTemplate,
        recipients: Vec<String>,
        workout_id: i64,
    ) -> Result<()> {
        self.notifier
            .send_email(template.subject(), &recipients, template.id(), None)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Workout {} was saved but the {} email failed: {}",
                    workout_id,
                    template.id(),
                    e
                );
                e.into()
            })
    }
}
