use axum::{extract::Path, Json};
use shared::{
    api::{
        error::ServerError,
        response_errors::{FetchError, UserError},
    },
    model::User,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn fetch_users(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<User>>, ServerError<FetchError>> {
    let users = conn.interact(|conn| User::fetch_all(conn)).await??;

    Ok(Json(users))
}

#[instrument(skip(conn))]
pub async fn fetch_user(
    DatabaseConnection(conn): DatabaseConnection,
    Path(id): Path<i64>,
) -> Result<Json<User>, ServerError<UserError>> {
    let user = conn
        .interact(move |conn| {
            let user = User::fetch_maybe(conn, id)?.ok_or(UserError::NotFound { id })?;
            Ok::<_, ServerError<UserError>>(user)
        })
        .await??;

    Ok(Json(user))
}
