use axum::{
    extract::FromRef,
    routing::get,
    Router,
};
use deadpool_sqlite::Pool;
use shared::api::Object;

mod exercises;
pub use exercises::*;

mod lookups;
pub use lookups::*;

mod reports;
pub use reports::*;

mod status;
pub use status::*;

mod users;
pub use users::*;

mod workout_exercises;
pub use workout_exercises::*;

mod workouts;
pub use workouts::*;

use crate::fallback;

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    Pool: FromRef<S>,
{
    Router::new()
        .route(Object::Index.path(), get(index))
        .route(Object::Health.path(), get(health))
        .route(
            Object::Exercise.path(),
            get(fetch_exercises).post(create_exercise),
        )
        .route(
            Object::ExerciseId.path(),
            get(fetch_exercise)
                .put(update_exercise)
                .delete(delete_exercise),
        )
        .route(
            Object::Workout.path(),
            get(fetch_workouts).post(create_workout),
        )
        .route(
            Object::WorkoutId.path(),
            get(fetch_workout).put(update_workout).delete(delete_workout),
        )
        .route(
            Object::WorkoutExercise.path(),
            get(fetch_workout_exercises).post(create_workout_exercise),
        )
        .route(
            Object::WorkoutExerciseId.path(),
            get(fetch_workout_exercise)
                .put(update_workout_exercise)
                .delete(delete_workout_exercise),
        )
        .route(Object::ReportSummary.path(), get(fetch_report_summary))
        .route(Object::Categories.path(), get(fetch_categories))
        .route(Object::MuscleGroups.path(), get(fetch_muscle_groups))
        .route(Object::User.path(), get(fetch_users))
        .route(Object::UserId.path(), get(fetch_user))
        .fallback(fallback)
}
