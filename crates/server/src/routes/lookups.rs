//! Distinct values currently in use, for populating dropdowns

use axum::Json;
use shared::{
    api::{error::ServerError, response_errors::FetchError},
    model::{Category, Exercise},
};
use tracing::instrument;

use crate::db::DatabaseConnection;

#[instrument(skip(conn))]
pub async fn fetch_categories(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<Category>>, ServerError<FetchError>> {
    let categories = conn.interact(|conn| Exercise::categories(conn)).await??;

    Ok(Json(categories))
}

#[instrument(skip(conn))]
pub async fn fetch_muscle_groups(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<Vec<String>>, ServerError<FetchError>> {
    let muscle_groups = conn.interact(|conn| Exercise::muscle_groups(conn)).await??;

    Ok(Json(muscle_groups))
}
