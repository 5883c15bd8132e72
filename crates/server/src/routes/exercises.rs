use axum::{extract::Path, http::StatusCode, Json};
use shared::{
    api::{
        error::ServerError,
        payloads::DeleteResponse,
        response_errors::{ExerciseError, FetchError},
    },
    model::{Exercise, ExerciseUpdate, NewExercise, ValidateModel},
};
use tracing::instrument;

use crate::{db::DatabaseConnection, JsonBody};

#[instrument(skip(conn))]
pub async fn fetch_exercises(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<Exercise>>, ServerError<FetchError>> {
    let exercises = conn
        .interact(|conn| Exercise::fetch_all(conn))
        .await??;

    Ok(Json(exercises))
}

#[instrument(skip(conn))]
pub async fn fetch_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<Exercise>, ServerError<ExerciseError>> {
    let exercise = conn
        .interact(move |conn| {
            let exercise =
                Exercise::fetch_maybe(conn, id)?.ok_or(ExerciseError::NotFound { id })?;
            Ok::<_, ServerError<ExerciseError>>(exercise)
        })
        .await??;

    Ok(Json(exercise))
}

#[instrument(skip(conn))]
pub async fn create_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    JsonBody(new_exercise): JsonBody<NewExercise>,
) -> Result<(StatusCode, Json<Exercise>), ServerError<ExerciseError>> {
    new_exercise.validate()?;

    let exercise = conn
        .interact(move |conn| {
            if Exercise::fetch_by_name(conn, &new_exercise.name)?.is_some() {
                return Err(ExerciseError::NameTaken {
                    name: new_exercise.name,
                }
                .into());
            }

            let exercise = Exercise::create(conn, new_exercise)?;
            Ok::<_, ServerError<ExerciseError>>(exercise)
        })
        .await??;

    Ok((StatusCode::CREATED, Json(exercise)))
}

#[instrument(skip(conn))]
pub async fn update_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
    JsonBody(update): JsonBody<ExerciseUpdate>,
) -> Result<Json<Exercise>, ServerError<ExerciseError>> {
    update.validate()?;

    let exercise = conn
        .interact(move |conn| {
            let mut exercise =
                Exercise::fetch_maybe(conn, id)?.ok_or(ExerciseError::NotFound { id })?;

            if let Some(name) = &update.name {
                let taken = Exercise::fetch_by_name(conn, name)?
                    .is_some_and(|other| other.exercise_id != id);
                if taken {
                    return Err(ExerciseError::NameTaken { name: name.clone() }.into());
                }
            }

            exercise.apply(update);
            exercise.update(conn)?;

            Ok::<_, ServerError<ExerciseError>>(exercise)
        })
        .await??;

    Ok(Json(exercise))
}

#[instrument(skip(conn))]
pub async fn delete_exercise(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ServerError<ExerciseError>> {
    let deleted = conn
        .interact(move |conn| Exercise::delete(conn, id))
        .await??;

    if !deleted {
        return Err(ExerciseError::NotFound { id }.into());
    }

    Ok(Json(DeleteResponse::deleted("Exercise")))
}
