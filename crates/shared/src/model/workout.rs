use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    super::{Exercise, WorkoutExercise},
    crate::api::error::{ServerError, ServerErrorContext},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    std::collections::HashMap,
    tracing::instrument,
};

use super::{ValidateModel, WorkoutExerciseDetail};
use crate::api::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Workout {
    pub workout_id: i64,
    pub user_id: i64,
    pub workout_date: NaiveDate,
    pub duration_minutes: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout"))]
pub struct NewWorkout {
    pub user_id: i64,
    pub workout_date: NaiveDate,
    #[serde(default)]
    pub duration_minutes: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workout_date: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub duration_minutes: Option<Option<i64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub notes: Option<Option<String>>,
}

/// A workout together with its exercise logs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDetail {
    #[serde(flatten)]
    pub workout: Workout,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

fn validate_duration(errors: &mut ValidationError, duration_minutes: Option<i64>) {
    if duration_minutes.is_some_and(|d| d < 0) {
        errors.push("duration_minutes cannot be negative");
    }
}

impl ValidateModel for NewWorkout {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        validate_duration(&mut errors, self.duration_minutes);
        errors.into_result()
    }
}

impl ValidateModel for WorkoutUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        validate_duration(&mut errors, self.duration_minutes.flatten());
        errors.into_result()
    }
}

impl Workout {
    pub fn apply(&mut self, update: WorkoutUpdate) {
        let WorkoutUpdate {
            workout_date,
            duration_minutes,
            notes,
        } = update;

        if let Some(workout_date) = workout_date {
            self.workout_date = workout_date;
        }
        if let Some(duration_minutes) = duration_minutes {
            self.duration_minutes = duration_minutes;
        }
        if let Some(notes) = notes {
            self.notes = notes;
        }
    }
}

#[cfg(feature = "backend")]
impl Workout {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                WorkoutIden::WorkoutId,
                WorkoutIden::UserId,
                WorkoutIden::WorkoutDate,
                WorkoutIden::DurationMinutes,
                WorkoutIden::Notes,
            ])
            .from(WorkoutIden::Table)
            .to_owned()
    }

    fn query_all(conn: &Connection, select: &SelectStatement) -> Result<Vec<Workout>, rusqlite::Error> {
        let (sql, values) = select.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Workout::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    /// All workouts in insertion order
    pub fn fetch_all(conn: &Connection) -> Result<Vec<Workout>, rusqlite::Error> {
        Self::query_all(
            conn,
            Self::select_star().order_by(WorkoutIden::WorkoutId, Order::Asc),
        )
    }

    /// All workouts, most recent first
    pub fn fetch_all_recent_first(conn: &Connection) -> Result<Vec<Workout>, rusqlite::Error> {
        Self::query_all(
            conn,
            Self::select_star()
                .order_by(WorkoutIden::WorkoutDate, Order::Desc)
                .order_by(WorkoutIden::WorkoutId, Order::Desc),
        )
    }

    pub fn fetch_maybe(conn: &Connection, id: i64) -> Result<Option<Workout>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutIden::WorkoutId).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Workout::from_row).optional()
    }

    pub fn exists(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
        Ok(Self::fetch_maybe(conn, id)?.is_some())
    }

    #[instrument(skip(conn))]
    pub fn create<T>(conn: &mut Connection, new_workout: NewWorkout) -> Result<Workout, ServerError<T>> {
        let tx = conn.transaction()?;
        let workout = {
            new_workout.insert(&tx).context("Workout::create(insert)")?;
            Workout::fetch_maybe(&tx, tx.last_insert_rowid())?
                .ok_or_else(|| crate::other_error!("Workout::create: inserted workout not found"))?
        };
        tx.commit()?;

        Ok(workout)
    }

    #[instrument(skip(conn))]
    pub fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(WorkoutIden::Table)
            .values([
                (WorkoutIden::UserId, self.user_id.into()),
                (WorkoutIden::WorkoutDate, self.workout_date.into()),
                (WorkoutIden::DurationMinutes, self.duration_minutes.into()),
                (WorkoutIden::Notes, self.notes.clone().into()),
            ])
            .and_where(Expr::col(WorkoutIden::WorkoutId).eq(self.workout_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    /// Deletes the workout and, through the foreign key cascade, its logs.
    /// Returns false if there was nothing to delete
    #[instrument(skip(conn))]
    pub fn delete(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutIden::Table)
            .and_where(Expr::col(WorkoutIden::WorkoutId).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())? > 0)
    }

    /// Loads the logs of this workout, each enriched with its exercise
    pub fn with_exercises(self, conn: &Connection) -> Result<WorkoutDetail, rusqlite::Error> {
        let logs = WorkoutExercise::fetch_for_workout(conn, self.workout_id)?;
        let mut exercises: HashMap<i64, Option<Exercise>> = HashMap::new();
        let mut details = Vec::with_capacity(logs.len());
        for log in logs {
            let exercise = match exercises.get(&log.exercise_id) {
                Some(exercise) => exercise.clone(),
                None => {
                    let exercise = Exercise::fetch_maybe(conn, log.exercise_id)?;
                    exercises.insert(log.exercise_id, exercise.clone());
                    exercise
                },
            };
            details.push(WorkoutExerciseDetail::new(log, exercise.as_ref()));
        }

        Ok(WorkoutDetail {
            workout: self,
            exercises: details,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Category, WorkoutExercise};

    #[test]
    fn update_can_clear_notes() {
        let mut workout = Workout {
            workout_id: 4,
            user_id: 1,
            workout_date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
            duration_minutes: Some(60),
            notes: Some("Leg day".into()),
        };
        let update: WorkoutUpdate =
            serde_json::from_str(r#"{"workout_date": "2025-10-29", "notes": null}"#).unwrap();
        workout.apply(update);

        assert_eq!(workout.workout_date, NaiveDate::from_ymd_opt(2025, 10, 29).unwrap());
        assert_eq!(workout.duration_minutes, Some(60));
        assert_eq!(workout.notes, None);
    }

    #[test]
    fn negative_durations_are_rejected() {
        let update = WorkoutUpdate {
            duration_minutes: Some(Some(-5)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
        assert!(WorkoutUpdate::default().validate().is_ok());
    }

    #[test]
    fn detail_serializes_flat() {
        let detail = WorkoutDetail {
            workout: Workout {
                workout_id: 1,
                user_id: 1,
                workout_date: NaiveDate::from_ymd_opt(2025, 10, 28).unwrap(),
                duration_minutes: None,
                notes: None,
            },
            exercises: vec![WorkoutExerciseDetail {
                log: WorkoutExercise {
                    log_id: 2,
                    workout_id: 1,
                    exercise_id: 3,
                    sets: Some(4),
                    reps: Some(8),
                    weight_lbs: Some(185.0),
                    distance_miles: None,
                    duration_seconds: None,
                },
                exercise_name: Some("Bench Press".into()),
                exercise_category: Some(Category::Strength),
            }],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["workout_date"], "2025-10-28");
        assert_eq!(json["exercises"][0]["exercise_name"], "Bench Press");
        assert_eq!(json["exercises"][0]["exercise_category"], "strength");
        assert_eq!(json["exercises"][0]["weight_lbs"], 185.0);
    }
}
