use std::fmt;

use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

/// Lifecycle stage of a workout. Only ever advances forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    #[default]
    Requested,
    Approved,
    Completed,
}

impl WorkoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutStatus::Requested => "requested",
            WorkoutStatus::Approved => "approved",
            WorkoutStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(WorkoutStatus::Requested),
            "approved" => Some(WorkoutStatus::Approved),
            "completed" => Some(WorkoutStatus::Completed),
            _ => None,
        }
    }

    /// The stage this one may advance to, if any.
    pub fn next(&self) -> Option<Self> {
        match self {
            WorkoutStatus::Requested => Some(WorkoutStatus::Approved),
            WorkoutStatus::Approved => Some(WorkoutStatus::Completed),
            WorkoutStatus::Completed => None,
        }
    }
}

impl fmt::Display for WorkoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for WorkoutStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for WorkoutStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let s = value.as_str()?;
        WorkoutStatus::parse(s)
            .ok_or_else(|| FromSqlError::Other(format!("unknown workout status: {s}").into()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub athlete: String,
    pub coach: String,
    pub scheduled: DateTime<Utc>,
    pub description: Option<String>,
    pub status: WorkoutStatus,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            athlete: row.get("athlete")?,
            coach: row.get("coach")?,
            scheduled: row.get("scheduled")?,
            description: row.get("description")?,
            status: row.get("status")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Payload for asking a coach for a new session.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestNewWorkout {
    pub athlete: String,
    pub coach: String,
    pub scheduled: DateTime<Utc>,
}

/// Replacement values for a workout. Both fields are always written, so a
/// missing description clears the stored one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateWorkout {
    pub scheduled: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A workout the store has not assigned an id to yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkout {
    pub athlete: String,
    pub coach: String,
    pub scheduled: DateTime<Utc>,
    pub status: WorkoutStatus,
}

impl From<RequestNewWorkout> for NewWorkout {
    fn from(r: RequestNewWorkout) -> Self {
        Self {
            athlete: r.athlete,
            coach: r.coach,
            scheduled: r.scheduled,
            status: WorkoutStatus::Requested,
        }
    }
}

/// The fields an update is allowed to touch. The parties are fixed at request time.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutChanges {
    pub scheduled: DateTime<Utc>,
    pub description: Option<String>,
}

impl From<UpdateWorkout> for WorkoutChanges {
    fn from(u: UpdateWorkout) -> Self {
        Self {
            scheduled: u.scheduled,
            description: u.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_workout_status_as_str() {
        assert_eq!(WorkoutStatus::Requested.as_str(), "requested");
        assert_eq!(WorkoutStatus::Approved.as_str(), "approved");
        assert_eq!(WorkoutStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn test_workout_status_parse() {
        assert_eq!(WorkoutStatus::parse("approved"), Some(WorkoutStatus::Approved));
        assert_eq!(WorkoutStatus::parse("Approved"), None);
        assert_eq!(WorkoutStatus::parse("rejected"), None);
        assert_eq!(WorkoutStatus::parse(""), None);
    }

    #[test]
    fn test_workout_status_only_moves_forward() {
        assert_eq!(WorkoutStatus::Requested.next(), Some(WorkoutStatus::Approved));
        assert_eq!(WorkoutStatus::Approved.next(), Some(WorkoutStatus::Completed));
        assert_eq!(WorkoutStatus::Completed.next(), None);
    }

    #[test]
    fn test_workout_status_default_is_requested() {
        assert_eq!(WorkoutStatus::default(), WorkoutStatus::Requested);
    }

    #[test]
    fn test_new_workout_copies_request_verbatim() {
        let scheduled = Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap();
        let new: NewWorkout = RequestNewWorkout {
            athlete: "ana".to_string(),
            coach: "carl".to_string(),
            scheduled,
        }
        .into();

        assert_eq!(new.athlete, "ana");
        assert_eq!(new.coach, "carl");
        assert_eq!(new.scheduled, scheduled);
        assert_eq!(new.status, WorkoutStatus::Requested);
    }

    #[test]
    fn test_update_workout_deserializes_without_description() {
        let update: UpdateWorkout =
            serde_json::from_str(r#"{"scheduled":"2024-03-01T07:30:00Z"}"#).unwrap();
        let changes = WorkoutChanges::from(update);

        assert_eq!(
            changes.scheduled,
            Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).unwrap()
        );
        assert_eq!(changes.description, None);
    }
}
