#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};

use workout_scheduler::db::{create_memory_pool, DbPool};
use workout_scheduler::error::{NotificationError, StoreError};
use workout_scheduler::handlers::workouts::WorkoutsState;
use workout_scheduler::migrations::run_migrations;
use workout_scheduler::models::{NewWorkout, Workout, WorkoutChanges, WorkoutStatus};
use workout_scheduler::notifications::{NotificationGateway, TemplateData};
use workout_scheduler::repositories::{StoreResult, WorkoutRepository, WorkoutStore};
use workout_scheduler::services::WorkoutCoordinator;

pub fn setup_test_db() -> DbPool {
    let pool = create_memory_pool().expect("Failed to create test database");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

/// 2024-05-01 at the given hour, UTC.
pub fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub subject: String,
    pub recipients: Vec<String>,
    pub template_id: String,
    pub had_data: bool,
}

/// Notifier double that records every call and optionally fails them.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentEmail>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl NotificationGateway for RecordingNotifier {
    async fn send_email(
        &self,
        subject: &str,
        recipients: &[String],
        template_id: &str,
        template_data: Option<&TemplateData>,
    ) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(SentEmail {
            subject: subject.to_string(),
            recipients: recipients.to_vec(),
            template_id: template_id.to_string(),
            had_data: template_data.is_some(),
        });

        if self.fail {
            return Err(NotificationError::Delivery("mail server down".to_string()));
        }
        Ok(())
    }
}

/// Store double where every call fails.
pub struct UnavailableStore;

impl UnavailableStore {
    fn down<T>() -> StoreResult<T> {
        Err(StoreError::Internal("store unavailable".to_string()))
    }
}

#[async_trait]
impl WorkoutStore for UnavailableStore {
    async fn fetch_workouts(&self) -> StoreResult<Vec<Workout>> {
        Self::down()
    }

    async fn filter_workouts_by_athlete(&self, _athlete: &str) -> StoreResult<Vec<Workout>> {
        Self::down()
    }

    async fn filter_workouts_by_coach(&self, _coach: &str) -> StoreResult<Vec<Workout>> {
        Self::down()
    }

    async fn new_workout(&self, _workout: NewWorkout) -> StoreResult<Workout> {
        Self::down()
    }

    async fn update_workout(&self, _id: i64, _changes: WorkoutChanges) -> StoreResult<Workout> {
        Self::down()
    }

    async fn approve_workout(&self, _id: i64) -> StoreResult<Workout> {
        Self::down()
    }

    async fn complete_workout(&self, _id: i64) -> StoreResult<()> {
        Self::down()
    }
}

pub fn create_coordinator(pool: &DbPool, notifier: Arc<RecordingNotifier>) -> WorkoutCoordinator {
    WorkoutCoordinator::new(Arc::new(WorkoutRepository::new(pool.clone())), notifier)
}

pub fn create_test_app(pool: &DbPool, notifier: Arc<RecordingNotifier>) -> Router {
    let coordinator = create_coordinator(pool, notifier);
    workout_scheduler::routes::create_router(WorkoutsState { coordinator })
}

// Test data creation helpers
pub async fn seed_workout(
    pool: &DbPool,
    athlete: &str,
    coach: &str,
    scheduled: DateTime<Utc>,
) -> Workout {
    let repo = WorkoutRepository::new(pool.clone());
    repo.new_workout(NewWorkout {
        athlete: athlete.to_string(),
        coach: coach.to_string(),
        scheduled,
        status: WorkoutStatus::Requested,
    })
    .await
    .unwrap()
}

pub async fn find_workout(pool: &DbPool, id: i64) -> Option<Workout> {
    let repo = WorkoutRepository::new(pool.clone());
    repo.fetch_workouts()
        .await
        .unwrap()
        .into_iter()
        .find(|w| w.id == id)
}

pub fn recipient_set(email: &SentEmail) -> std::collections::BTreeSet<String> {
    email.recipients.iter().cloned().collect()
}
