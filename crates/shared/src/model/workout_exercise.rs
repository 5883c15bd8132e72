use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    crate::api::error::{ServerError, ServerErrorContext},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    tracing::instrument,
};

use super::{Category, Exercise, ValidateModel};
use crate::api::error::ValidationError;

/// One performed exercise within a workout. Strength work usually fills in
/// sets/reps/weight and cardio distance/duration, but any combination is
/// allowed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct WorkoutExercise {
    pub log_id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: Option<i64>,
    pub reps: Option<i64>,
    pub weight_lbs: Option<f64>,
    pub distance_miles: Option<f64>,
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("workout_exercise"))]
pub struct NewWorkoutExercise {
    pub workout_id: i64,
    pub exercise_id: i64,
    #[serde(default)]
    pub sets: Option<i64>,
    #[serde(default)]
    pub reps: Option<i64>,
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub distance_miles: Option<f64>,
    #[serde(default)]
    pub duration_seconds: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutExerciseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub sets: Option<Option<i64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub reps: Option<Option<i64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub weight_lbs: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub distance_miles: Option<Option<f64>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub duration_seconds: Option<Option<i64>>,
}

/// A log enriched with the name and category of its exercise. Both are `None`
/// if the exercise can't be resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExerciseDetail {
    #[serde(flatten)]
    pub log: WorkoutExercise,
    pub exercise_name: Option<String>,
    pub exercise_category: Option<Category>,
}

impl WorkoutExerciseDetail {
    pub fn new(log: WorkoutExercise, exercise: Option<&Exercise>) -> Self {
        Self {
            log,
            exercise_name: exercise.map(|e| e.name.clone()),
            exercise_category: exercise.map(|e| e.category),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Measurements {
    sets: Option<i64>,
    reps: Option<i64>,
    weight_lbs: Option<f64>,
    distance_miles: Option<f64>,
    duration_seconds: Option<i64>,
}

impl Measurements {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.sets.is_some_and(|v| v <= 0) {
            errors.push("sets must be a positive integer");
        }
        if self.reps.is_some_and(|v| v <= 0) {
            errors.push("reps must be a positive integer");
        }
        if self.weight_lbs.is_some_and(|v| !v.is_finite() || v < 0.0) {
            errors.push("weight_lbs must be a non-negative number");
        }
        if self.distance_miles.is_some_and(|v| !v.is_finite() || v < 0.0) {
            errors.push("distance_miles must be a non-negative number");
        }
        if self.duration_seconds.is_some_and(|v| v < 0) {
            errors.push("duration_seconds must be a non-negative integer");
        }
        errors.into_result()
    }
}

impl ValidateModel for NewWorkoutExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        Measurements {
            sets: self.sets,
            reps: self.reps,
            weight_lbs: self.weight_lbs,
            distance_miles: self.distance_miles,
            duration_seconds: self.duration_seconds,
        }
        .validate()
    }
}

impl ValidateModel for WorkoutExerciseUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        Measurements {
            sets: self.sets.flatten(),
            reps: self.reps.flatten(),
            weight_lbs: self.weight_lbs.flatten(),
            distance_miles: self.distance_miles.flatten(),
            duration_seconds: self.duration_seconds.flatten(),
        }
        .validate()
    }
}

impl WorkoutExercise {
    /// `sets × reps` with a missing operand counting as zero, clamped at `i64::MAX`
    pub fn total_reps(&self) -> i64 {
        self.sets.unwrap_or(0).saturating_mul(self.reps.unwrap_or(0))
    }

    pub fn apply(&mut self, update: WorkoutExerciseUpdate) {
        let WorkoutExerciseUpdate {
            exercise_id,
            sets,
            reps,
            weight_lbs,
            distance_miles,
            duration_seconds,
        } = update;

        if let Some(exercise_id) = exercise_id {
            self.exercise_id = exercise_id;
        }
        if let Some(sets) = sets {
            self.sets = sets;
        }
        if let Some(reps) = reps {
            self.reps = reps;
        }
        if let Some(weight_lbs) = weight_lbs {
            self.weight_lbs = weight_lbs;
        }
        if let Some(distance_miles) = distance_miles {
            self.distance_miles = distance_miles;
        }
        if let Some(duration_seconds) = duration_seconds {
            self.duration_seconds = duration_seconds;
        }
    }
}

#[cfg(feature = "backend")]
impl WorkoutExercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                WorkoutExerciseIden::LogId,
                WorkoutExerciseIden::WorkoutId,
                WorkoutExerciseIden::ExerciseId,
                WorkoutExerciseIden::Sets,
                WorkoutExerciseIden::Reps,
                WorkoutExerciseIden::WeightLbs,
                WorkoutExerciseIden::DistanceMiles,
                WorkoutExerciseIden::DurationSeconds,
            ])
            .from(WorkoutExerciseIden::Table)
            .to_owned()
    }

    fn query_all(
        conn: &Connection,
        select: &SelectStatement,
    ) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        let (sql, values) = select.build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), WorkoutExercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    pub fn fetch_all(conn: &Connection) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        Self::query_all(
            conn,
            Self::select_star().order_by(WorkoutExerciseIden::LogId, Order::Asc),
        )
    }

    pub fn fetch_for_workout(
        conn: &Connection,
        workout_id: i64,
    ) -> Result<Vec<WorkoutExercise>, rusqlite::Error> {
        Self::query_all(
            conn,
            Self::select_star()
                .and_where(Expr::col(WorkoutExerciseIden::WorkoutId).eq(workout_id))
                .order_by(WorkoutExerciseIden::LogId, Order::Asc),
        )
    }

    pub fn fetch_maybe(
        conn: &Connection,
        id: i64,
    ) -> Result<Option<WorkoutExercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(WorkoutExerciseIden::LogId).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), WorkoutExercise::from_row)
            .optional()
    }

    #[instrument(skip(conn))]
    pub fn create<T>(
        conn: &mut Connection,
        new_log: NewWorkoutExercise,
    ) -> Result<WorkoutExercise, ServerError<T>> {
        let tx = conn.transaction()?;
        let log = {
            new_log.insert(&tx).context("WorkoutExercise::create(insert)")?;
            WorkoutExercise::fetch_maybe(&tx, tx.last_insert_rowid())?.ok_or_else(|| {
                crate::other_error!("WorkoutExercise::create: inserted log not found")
            })?
        };
        tx.commit()?;

        Ok(log)
    }

    #[instrument(skip(conn))]
    pub fn update(&self, conn: &Connection) -> Result<(), rusqlite::Error> {
        let (sql, values) = Query::update()
            .table(WorkoutExerciseIden::Table)
            .values([
                (WorkoutExerciseIden::WorkoutId, self.workout_id.into()),
                (WorkoutExerciseIden::ExerciseId, self.exercise_id.into()),
                (WorkoutExerciseIden::Sets, self.sets.into()),
                (WorkoutExerciseIden::Reps, self.reps.into()),
                (WorkoutExerciseIden::WeightLbs, self.weight_lbs.into()),
                (WorkoutExerciseIden::DistanceMiles, self.distance_miles.into()),
                (WorkoutExerciseIden::DurationSeconds, self.duration_seconds.into()),
            ])
            .and_where(Expr::col(WorkoutExerciseIden::LogId).eq(self.log_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())?;

        Ok(())
    }

    #[instrument(skip(conn))]
    pub fn delete(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(WorkoutExerciseIden::Table)
            .and_where(Expr::col(WorkoutExerciseIden::LogId).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())? > 0)
    }

    pub fn detail(self, conn: &Connection) -> Result<WorkoutExerciseDetail, rusqlite::Error> {
        let exercise = Exercise::fetch_maybe(conn, self.exercise_id)?;
        Ok(WorkoutExerciseDetail::new(self, exercise.as_ref()))
    }
}
