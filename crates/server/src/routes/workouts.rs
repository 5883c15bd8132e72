use axum::{extract::Path, http::StatusCode, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::DeleteResponse,
        response_errors::{FetchError, WorkoutError},
    },
    model::{NewWorkout, User, ValidateModel, Workout, WorkoutDetail, WorkoutUpdate},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, JsonBody};

/// Every workout, most recent first
#[instrument(skip(conn))]
pub async fn fetch_workouts(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<Workout>>, ServerError<FetchError>> {
    let workouts = conn
        .interact(|conn| Workout::fetch_all_recent_first(conn))
        .await??;

    Ok(Json(workouts))
}

#[instrument(skip(conn))]
pub async fn fetch_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<WorkoutDetail>, ServerError<WorkoutError>> {
    let workout = conn
        .interact(move |conn| {
            let workout = Workout::fetch_maybe(conn, id)?.ok_or(WorkoutError::NotFound { id })?;
            Ok::<_, ServerError<WorkoutError>>(workout.with_exercises(conn)?)
        })
        .await??;

    Ok(Json(workout))
}

#[instrument(skip(conn))]
pub async fn create_workout(
    DatabaseConnection(conn): DatabaseConnection,
    JsonBody(new_workout): JsonBody<NewWorkout>,
) -> Result<(StatusCode, Json<Workout>), ServerError<WorkoutError>> {
    new_workout.validate()?;

    let workout = conn
        .interact(move |conn| {
            let user_id = new_workout.user_id;
            if !User::exists(conn, user_id)? {
                return Err(WorkoutError::UnknownUser { user_id }.into());
            }

            let workout = Workout::create::<WorkoutError>(conn, new_workout)?;
            Ok::<_, ServerError<WorkoutError>>(workout)
        })
        .await??;

    Ok((StatusCode::CREATED, Json(workout)))
}

#[instrument(skip(conn))]
pub async fn update_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    JsonBody(update): JsonBody<WorkoutUpdate>,
) -> Result<Json<Workout>, ServerError<WorkoutError>> {
    update.validate()?;

    let workout = conn
        .interact(move |conn| {
            let mut workout =
                Workout::fetch_maybe(conn, id)?.ok_or(WorkoutError::NotFound { id })?;
            workout.apply(update);
            workout.update(conn)?;

            Ok::<_, ServerError<WorkoutError>>(workout)
        })
        .await??;

    Ok(Json(workout))
}

/// Removes the workout together with its logs
#[instrument(skip(conn))]
pub async fn delete_workout(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ServerError<WorkoutError>> {
    let deleted = conn
        .interact(move |conn| Workout::delete(conn, id))
        .await??;

    if !deleted {
        return Err(WorkoutError::NotFound { id }.into());
    }

    Ok(Json(DeleteResponse::deleted("Workout")))
}
