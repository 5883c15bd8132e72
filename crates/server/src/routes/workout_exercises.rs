use std::collections::HashMap;

use axum::{extract::Path, http::StatusCode, Json};
use rusqlite::Connection;
use shared::{
    api::{
        error::ServerError,
        payloads::DeleteResponse,
        response_errors::{FetchError, WorkoutExerciseError},
    },
    model::{
        Exercise, NewWorkoutExercise, ValidateModel, Workout, WorkoutExercise,
        WorkoutExerciseDetail, WorkoutExerciseUpdate,
    },
};
use tracing::instrument;

use crate::{db::DatabaseConnection, JsonBody};

fn ensure_exercise_exists(
    conn: &Connection,
    exercise_id: i64,
) -> Result<(), ServerError<WorkoutExerciseError>> {
    match Exercise::fetch_maybe(conn, exercise_id)? {
        Some(_) => Ok(()),
        None => Err(WorkoutExerciseError::UnknownExercise { exercise_id }.into()),
    }
}

/// Every log, each enriched with its exercise
#[instrument(skip(conn))]
pub async fn fetch_workout_exercises(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<WorkoutExerciseDetail>>, ServerError<FetchError>> {
    let logs = conn
        .interact(|conn| {
            let tx = conn.transaction()?;
            let exercises: HashMap<i64, Exercise> = Exercise::fetch_all(&tx)?
                .into_iter()
                .map(|e| (e.exercise_id, e))
                .collect();
            let logs = WorkoutExercise::fetch_all(&tx)?
                .into_iter()
                .map(|log| {
                    let exercise = exercises.get(&log.exercise_id);
                    WorkoutExerciseDetail::new(log, exercise)
                })
                .collect::<Vec<_>>();
            tx.commit()?;

            Ok::<_, ServerError<FetchError>>(logs)
        })
        .await??;

    Ok(Json(logs))
}

#[instrument(skip(conn))]
pub async fn fetch_workout_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<WorkoutExerciseDetail>, ServerError<WorkoutExerciseError>> {
    let log = conn
        .interact(move |conn| {
            let log = WorkoutExercise::fetch_maybe(conn, id)?
                .ok_or(WorkoutExerciseError::NotFound { id })?;
            Ok::<_, ServerError<WorkoutExerciseError>>(log.detail(conn)?)
        })
        .await??;

    Ok(Json(log))
}

#[instrument(skip(conn))]
pub async fn create_workout_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    JsonBody(new_log): JsonBody<NewWorkoutExercise>,
) -> Result<(StatusCode, Json<WorkoutExerciseDetail>), ServerError<WorkoutExerciseError>> {
    new_log.validate()?;

    let log = conn
        .interact(move |conn| {
            let workout_id = new_log.workout_id;
            if !Workout::exists(conn, workout_id)? {
                return Err(WorkoutExerciseError::UnknownWorkout { workout_id }.into());
            }
            ensure_exercise_exists(conn, new_log.exercise_id)?;

            let log = WorkoutExercise::create::<WorkoutExerciseError>(conn, new_log)?;
            Ok::<_, ServerError<WorkoutExerciseError>>(log.detail(conn)?)
        })
        .await??;

    Ok((StatusCode::CREATED, Json(log)))
}

#[instrument(skip(conn))]
pub async fn update_workout_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    JsonBody(update): JsonBody<WorkoutExerciseUpdate>,
) -> Result<Json<WorkoutExerciseDetail>, ServerError<WorkoutExerciseError>> {
    update.validate()?;

    let log = conn
        .interact(move |conn| {
            let mut log = WorkoutExercise::fetch_maybe(conn, id)?
                .ok_or(WorkoutExerciseError::NotFound { id })?;
            if let Some(exercise_id) = update.exercise_id {
                ensure_exercise_exists(conn, exercise_id)?;
            }

            log.apply(update);
            log.update(conn)?;

            Ok::<_, ServerError<WorkoutExerciseError>>(log.detail(conn)?)
        })
        .await??;

    Ok(Json(log))
}

#[instrument(skip(conn))]
pub async fn delete_workout_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ServerError<WorkoutExerciseError>> {
    let deleted = conn
        .interact(move |conn| WorkoutExercise::delete(conn, id))
        .await??;

    if !deleted {
        return Err(WorkoutExerciseError::NotFound { id }.into());
    }

    Ok(Json(DeleteResponse::deleted("Workout exercise")))
}
