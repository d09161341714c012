use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::db::DbPool;
use crate::error::StoreError;
use crate::models::{FromSqliteRow, NewWorkout, Workout, WorkoutChanges, WorkoutStatus};
use crate::repositories::workout_store::{StoreResult, WorkoutStore};

const SELECT_ALL: &str = "SELECT * FROM workouts ORDER BY scheduled, id";
const SELECT_BY_ATHLETE: &str = "SELECT * FROM workouts WHERE athlete = ? ORDER BY scheduled, id";
const SELECT_BY_COACH: &str = "SELECT * FROM workouts WHERE coach = ? ORDER BY scheduled, id";

/// SQLite-backed [`WorkoutStore`].
#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn select_many(
        &self,
        sql: &'static str,
        party: Option<String>,
    ) -> StoreResult<Vec<Workout>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> StoreResult<Vec<Workout>> {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(sql)?;
            let workouts = match party {
                Some(party) => stmt
                    .query_map([party], Workout::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
                None => stmt
                    .query_map([], Workout::from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?,
            };
            Ok(workouts)
        })
        .await
        .map_err(|e| StoreError::Internal(e.to_string()))?
    }

    /// Guarded `from -> to` transition. A miss is told apart as unknown id or wrong stage.
    async fn advance(
        &self,
        id: i64,
        from: WorkoutStatus,
        to: WorkoutStatus,
    ) -> StoreResult<Workout> {
        debug_assert_eq!(from.next(), Some(to));

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> StoreResult<Workout> {
            let conn = pool.get()?;
            let updated = conn.execute(
                "UPDATE workouts SET status = ? WHERE id = ? AND status = ?",
                rusqlite::params![to, id, from],
            )?;

            if updated == 0 {
                let current: Option<WorkoutStatus> = conn
                    .query_row("SELECT status FROM workouts WHERE id = ?", [id], |row| {
                        row.get(0)
                    })
                    .optional()?;

                return Err(match current {
                    Some(current) => StoreError::InvalidTransition {
                        id,
                        from: current,
                        to,
                    },
                    None => StoreError::NotFound(id),
                });
            }

            find_by_id(&conn, id)
        })
        .await
        .map_err(|e| StoreError::Internal(e.to_string()))?
    }
}

fn find_by_id(conn: &Connection, id: i64) -> StoreResult<Workout> {
    conn.query_row("SELECT * FROM workouts WHERE id = ?", [id], Workout::from_row)
        .optional()?
        .ok_or(StoreError::NotFound(id))
}

#[async_trait]
impl WorkoutStore for WorkoutRepository {
    async fn fetch_workouts(&self) -> StoreResult<Vec<Workout>> {
        self.select_many(SELECT_ALL, None).await
    }

    async fn filter_workouts_by_athlete(&self, athlete: &str) -> StoreResult<Vec<Workout>> {
        if athlete.is_empty() {
            return Ok(Vec::new());
        }
        self.select_many(SELECT_BY_ATHLETE, Some(athlete.to_string()))
            .await
    }

    async fn filter_workouts_by_coach(&self, coach: &str) -> StoreResult<Vec<Workout>> {
        if coach.is_empty() {
            return Ok(Vec::new());
        }
        self.select_many(SELECT_BY_COACH, Some(coach.to_string()))
            .await
    }

    async fn new_workout(&self, workout: NewWorkout) -> StoreResult<Workout> {
        let pool = self.pool.clone();
        let now = Utc::now();

        tokio::task::spawn_blocking(move || -> StoreResult<Workout> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO workouts (athlete, coach, scheduled, description, status, created_at)
                 VALUES (?, ?, ?, NULL, ?, ?)",
                rusqlite::params![
                    workout.athlete,
                    workout.coach,
                    workout.scheduled,
                    workout.status,
                    now
                ],
            )?;

            Ok(Workout {
                id: conn.last_insert_rowid(),
                athlete: workout.athlete,
                coach: workout.coach,
                scheduled: workout.scheduled,
                description: None,
                status: workout.status,
                created_at: now,
            })
        })
        .await
        .map_err(|e| StoreError::Internal(e.to_string()))?
    }

    async fn update_workout(&self, id: i64, changes: WorkoutChanges) -> StoreResult<Workout> {
        let pool = self.pool.clone();

        tokio::task::spawn_blocking(move || -> StoreResult<Workout> {
            let conn = pool.get()?;
            let updated = conn.execute(
                "UPDATE workouts SET scheduled = ?, description = ? WHERE id = ?",
                rusqlite::params![changes.scheduled, changes.description, id],
            )?;

            if updated == 0 {
                return Err(StoreError::NotFound(id));
            }

            find_by_id(&conn, id)
        })
        .await
        .map_err(|e| StoreError::Internal(e.to_string()))?
    }

    async fn approve_workout(&self, id: i64) -> StoreResult<Workout> {
        self.advance(id, WorkoutStatus::Requested, WorkoutStatus::Approved)
            .await
    }

    async fn complete_workout(&self, id: i64) -> StoreResult<()> {
        self.advance(id, WorkoutStatus::Approved, WorkoutStatus::Completed)
            .await?;
        Ok(())
    }
}
