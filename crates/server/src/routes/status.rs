use std::collections::BTreeMap;

use axum::Json;
use shared::api::{
    error::{Nothing, ServerError},
    payloads::{HealthResponse, IndexResponse},
    Object,
};
use tracing::instrument;

use crate::db::DatabaseConnection;

pub async fn index() -> Json<IndexResponse> {
    let endpoints = [
        ("exercises", Object::Exercise),
        ("workouts", Object::Workout),
        ("workout_exercises", Object::WorkoutExercise),
        ("reports", Object::ReportSummary),
        ("categories", Object::Categories),
        ("muscle_groups", Object::MuscleGroups),
        ("users", Object::User),
        ("health", Object::Health),
    ]
    .into_iter()
    .map(|(name, object)| (name.to_owned(), object.path().to_owned()))
    .collect::<BTreeMap<_, _>>();

    Json(IndexResponse {
        message: "Workout Tracker API".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        endpoints,
    })
}

/// Checks a pooled connection can still run a query
#[instrument(skip(conn))]
pub async fn health(
    DatabaseConnection(conn): DatabaseConnection,
) -> Result<Json<HealthResponse>, ServerError<Nothing>> {
    conn.interact(|conn| conn.query_row("SELECT 1", (), |row| row.get::<_, i64>(0)))
        .await??;

    Ok(Json(HealthResponse::healthy()))
}
